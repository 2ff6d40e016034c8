//! Left-fold collector

use async_trait::async_trait;
use futures_util::stream::StreamExt;

use super::Collector;
use crate::stream::StreamSource;

/// Folds the sequence left to right from an identity value.
pub struct ReduceCollector<A, F> {
    identity: A,
    reducer: F,
}

impl<A, F> ReduceCollector<A, F> {
    pub fn new(identity: A, reducer: F) -> Self {
        Self { identity, reducer }
    }
}

#[async_trait]
impl<T, A, F> Collector<T> for ReduceCollector<A, F>
where
    T: Send + 'static,
    A: Send + 'static,
    F: FnMut(A, T) -> A + Send + 'static,
{
    type Output = A;

    async fn collect(self, mut source: StreamSource<T>) -> A {
        let Self {
            identity,
            mut reducer,
        } = self;
        let mut result = identity;
        while let Some(value) = source.next().await {
            result = reducer(result, value);
        }
        result
    }
}
