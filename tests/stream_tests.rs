use streamlet::{Stream, StreamError};

#[tokio::test]
async fn test_iterate() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    let result = stream.take(10).to_vec().await.unwrap();
    assert_eq!(result, (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_map() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    let result = stream
        .take(10)
        .map(|value| value * 2)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, (1..=10).map(|value| value * 2).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_filter() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    let result = stream
        .take(10)
        .filter(|value| value % 2 == 0)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![2, 4, 6, 8, 10]);
}

#[tokio::test]
async fn test_stages_run_in_registration_order() {
    let mapped_first = Stream::range(1, 4)
        .unwrap()
        .map(|value| value + 1)
        .filter(|value| value % 2 == 0)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(mapped_first, vec![2, 4]);

    let filtered_first = Stream::range(1, 4)
        .unwrap()
        .filter(|value| value % 2 == 0)
        .map(|value| value + 1)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(filtered_first, vec![3, 5]);
}

#[tokio::test]
async fn test_reduce() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    let result = stream
        .take(10)
        .filter(|value| value % 2 == 0)
        .reduce(0, |carry, value| carry + value)
        .await
        .unwrap();
    assert_eq!(result, 30);
}

#[tokio::test]
async fn test_range_filter_reduce() {
    let sum = Stream::range(1, 10)
        .unwrap()
        .filter(|value| value % 2 == 0)
        .reduce(0, |carry, value| carry + value)
        .await
        .unwrap();
    assert_eq!(sum, 30);
}

#[tokio::test]
async fn test_first() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    let first = stream
        .filter(|value| value % 2 == 0)
        .map(|value| value * 2)
        .take(10)
        .first()
        .await;
    assert_eq!(first, Some(4));
}

#[tokio::test]
async fn test_first_on_unbounded_take_while() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    let first = stream
        .take_while(|value| *value <= 10)
        .filter(|value| value % 2 == 0)
        .first()
        .await;
    assert_eq!(first, Some(2));
}

#[tokio::test]
async fn test_first_or() {
    let first = Stream::<i64>::empty().first_or(42).await;
    assert_eq!(first, 42);

    let first = Stream::range(1, 5).unwrap().first_or(42).await;
    assert_eq!(first, 1);
}

#[tokio::test]
async fn test_first_or_else() {
    let first = Stream::range(1, 5)
        .unwrap()
        .filter(|value| *value > 100)
        .first_or_else(|| -1)
        .await;
    assert_eq!(first, -1);
}

#[tokio::test]
async fn test_first_where() {
    let found = Stream::range(1, 10)
        .unwrap()
        .map(|value| value * 3)
        .first_where(|value| value % 2 == 0)
        .await;
    assert_eq!(found, Some(6));
}

#[tokio::test]
async fn test_first_where_value() {
    let found = Stream::range(1, 10).unwrap().first_where_value(7).await;
    assert_eq!(found, Some(7));

    let missing = Stream::range(1, 10).unwrap().first_where_value(70).await;
    assert_eq!(missing, None);
}

#[tokio::test]
async fn test_first_or_fail_reports_value_not_found() {
    let result = Stream::<i64>::empty().first_or_fail(|value| *value > 0).await;
    assert_eq!(
        result,
        Err(StreamError::ValueNotFound(String::from(
            "the given predicate"
        )))
    );

    let result = Stream::range(1, 10).unwrap().first_or_fail_value(70).await;
    assert_eq!(result, Err(StreamError::ValueNotFound(String::from("70"))));
}

#[tokio::test]
async fn test_first_or_fail_finds_match() {
    let result = Stream::range(1, 10)
        .unwrap()
        .first_or_fail(|value| value % 7 == 0)
        .await;
    assert_eq!(result, Ok(7));
}

#[tokio::test]
async fn test_each() {
    let mut seen = Vec::new();
    Stream::iterate(1, |previous| previous + 1)
        .filter(|value| value % 2 == 0)
        .map(|value| value * 2)
        .take(10)
        .each(|value| seen.push(value))
        .await
        .unwrap();
    assert_eq!(seen, vec![4, 8, 12, 16, 20]);
}

#[tokio::test]
async fn test_last() {
    let last = Stream::range(1, 10)
        .unwrap()
        .filter(|value| value % 3 == 0)
        .last()
        .await
        .unwrap();
    assert_eq!(last, Some(9));

    let last = Stream::<i64>::empty().last().await.unwrap();
    assert_eq!(last, None);
}

#[tokio::test]
async fn test_take_while_stops_at_first_non_match() {
    let result = Stream::from_iter(vec![1, 2, 3, 10, 2, 1])
        .take_while(|value| *value < 5)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_take_while_value() {
    let result = Stream::from_iter(vec!["a", "a", "b", "a"])
        .take_while_value("a")
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec!["a", "a"]);
}

#[tokio::test]
async fn test_take_while_leaky_filters_without_stopping() {
    let result = Stream::from_iter(vec![1, 2, 30, 4])
        .take_while_leaky(|value| *value < 10)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 4]);
}

#[tokio::test]
async fn test_take_while_leaky_does_not_bound_the_stream() {
    let result = Stream::iterate(1, |previous| previous + 1)
        .take_while_leaky(|value| *value < 10)
        .to_vec()
        .await;
    assert_eq!(result, Err(StreamError::UnsafeStream));
}

#[tokio::test]
async fn test_take_until() {
    let result = Stream::iterate(1, |previous| previous + 1)
        .take_until(|value| *value > 20)
        .filter(|value| value % 5 == 0)
        .map(|value| value * 2)
        .first()
        .await;
    assert_eq!(result, Some(10));
}

#[tokio::test]
async fn test_take_until_excludes_the_matching_element() {
    let result = Stream::range(1, 10)
        .unwrap()
        .take_until(|value| *value == 4)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_take_until_value() {
    let result = Stream::range(1, 10)
        .unwrap()
        .take_until_value(5)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_take_zero() {
    let result = Stream::iterate(1, |previous| previous + 1)
        .take(0)
        .to_vec()
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_take_more_than_available() {
    let result = Stream::range(1, 3).unwrap().take(10).to_vec().await.unwrap();
    assert_eq!(result, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_skip() {
    let result = Stream::range(1, 10).unwrap().skip(3).to_vec().await.unwrap();
    assert_eq!(result, vec![4, 5, 6, 7, 8, 9, 10]);
}

#[tokio::test]
async fn test_skip_more_than_available() {
    let result = Stream::range(1, 3).unwrap().skip(10).to_vec().await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_range() {
    let result = Stream::range(1, 100).unwrap().to_vec().await.unwrap();
    assert_eq!(result, (1..=100).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_range_single_element() {
    let result = Stream::range(5, 5).unwrap().to_vec().await.unwrap();
    assert_eq!(result, vec![5]);
}

#[tokio::test]
async fn test_range_step() {
    let result = Stream::range_step(1, 10, 3).unwrap().to_vec().await.unwrap();
    assert_eq!(result, vec![1, 4, 7, 10]);
}

#[tokio::test]
async fn test_range_step_descending() {
    let result = Stream::range_step(10, 1, -3)
        .unwrap()
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![10, 7, 4, 1]);
}

#[test]
fn test_range_rejects_unreachable_bounds() {
    assert_eq!(
        Stream::range_step(1, 10, 0).err(),
        Some(StreamError::InvalidRange {
            start: 1,
            end: 10,
            step: 0
        })
    );
    assert_eq!(
        Stream::range_step(1, 10, -1).err(),
        Some(StreamError::InvalidRange {
            start: 1,
            end: 10,
            step: -1
        })
    );
    assert_eq!(
        Stream::range_step(10, 1, 1).err(),
        Some(StreamError::InvalidRange {
            start: 10,
            end: 1,
            step: 1
        })
    );
}

#[test]
fn test_is_infinite_flag() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    assert!(stream.is_infinite());
    assert!(!stream.take(3).is_infinite());
    assert!(!Stream::range(1, 3).unwrap().is_infinite());
}

#[tokio::test]
async fn test_unbounded_stream_refuses_full_materialization() {
    let stream = Stream::iterate(1, |previous| previous + 1);
    assert_eq!(stream.to_vec().await, Err(StreamError::UnsafeStream));

    let stream = Stream::iterate(1, |previous| previous + 1);
    assert_eq!(
        stream.reduce(0, |carry, value| carry + value).await,
        Err(StreamError::UnsafeStream)
    );

    let stream = Stream::iterate(1, |previous| previous + 1);
    assert_eq!(stream.each(|_| {}).await, Err(StreamError::UnsafeStream));

    let stream = Stream::iterate(1, |previous| previous + 1);
    assert_eq!(stream.last().await, Err(StreamError::UnsafeStream));
}

#[tokio::test]
async fn test_bounding_clears_the_unsafe_flag() {
    let result = Stream::iterate(1, |previous| previous + 1)
        .take_until(|value| *value > 5)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 3, 4, 5]);

    let result = Stream::iterate(1, |previous| previous + 1)
        .take_while(|value| *value <= 5)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 3, 4, 5]);
}

#[derive(Debug, PartialEq)]
struct Celsius(i64);

impl From<i64> for Celsius {
    fn from(value: i64) -> Self {
        Celsius(value)
    }
}

#[tokio::test]
async fn test_map_into() {
    let result = Stream::range(1, 3)
        .unwrap()
        .map_into::<Celsius>()
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![Celsius(1), Celsius(2), Celsius(3)]);
}

#[tokio::test]
async fn test_map_into_preserves_the_unsafe_flag() {
    let result = Stream::iterate(1, |previous| previous + 1)
        .map_into::<Celsius>()
        .to_vec()
        .await;
    assert_eq!(result, Err(StreamError::UnsafeStream));
}

#[tokio::test]
async fn test_map_into_applies_prior_stages() {
    let result = Stream::range(1, 6)
        .unwrap()
        .filter(|value| value % 2 == 0)
        .map_into::<Celsius>()
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![Celsius(2), Celsius(4), Celsius(6)]);
}

#[tokio::test]
async fn test_take_until_timeout_with_past_deadline() {
    let deadline = chrono::Utc::now() - chrono::Duration::seconds(1);
    let result = Stream::iterate(1, |previous| previous + 1)
        .take_until_timeout(deadline)
        .to_vec()
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_take_until_timeout_with_future_deadline() {
    let deadline = chrono::Utc::now() + chrono::Duration::seconds(60);
    let result = Stream::range(1, 5)
        .unwrap()
        .take_until_timeout(deadline)
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_take_for_with_zero_window() {
    let result = Stream::iterate(1, |previous| previous + 1)
        .take_for(std::time::Duration::ZERO)
        .to_vec()
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_take_for_with_generous_window() {
    let result = Stream::range(1, 5)
        .unwrap()
        .take_for(std::time::Duration::from_secs(60))
        .to_vec()
        .await
        .unwrap();
    assert_eq!(result, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_of_wraps_an_existing_stream() {
    let source = futures::stream::iter(vec![3, 1, 4]);
    let result = Stream::of(source).to_vec().await.unwrap();
    assert_eq!(result, vec![3, 1, 4]);
}

#[tokio::test]
async fn test_empty() {
    let result = Stream::<i64>::empty().to_vec().await.unwrap();
    assert!(result.is_empty());
}
