//! Lazy stream pipeline
//!
//! A [`Stream`] owns a pull-based source and an append-only list of pipeline
//! stages. `map`/`filter` only register stages; nothing is pulled until a
//! terminal operation drives a single pass over the source, pushing each
//! element through the composed pipeline and folding accepted values into the
//! result. Bounding operations (`take`, `skip`, `take_until`, `take_while`)
//! replace the source itself with a generator over the previous source, which
//! is what makes unbounded sources safe to traverse.
//!
//! A stream is a single-consumption value: every bounding and terminal
//! operation takes it by value, so a partially consumed stream can never be
//! observed twice.

use std::fmt;
use std::time::Duration;

use async_stream::stream;
use chrono::{DateTime, Utc};
use futures_core::Stream as FuturesStream;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::collectors::{Collector, ReduceCollector, VecCollector};
use crate::condition::Condition;
use crate::error::{StreamError, StreamResult};
use crate::input::StreamInput;
use crate::operator::{run_pipeline, Stage};

/// A boxed, heap-allocated pull-based source sequence.
pub type StreamSource<T> = BoxStream<'static, T>;

/// A lazy, single-pass pipeline over a source sequence.
pub struct Stream<T> {
    source: StreamSource<T>,
    stages: Vec<Stage<T>>,
    infinite: bool,
}

impl<T: Send + 'static> Stream<T> {
    fn new(source: StreamSource<T>, infinite: bool) -> Self {
        Self {
            source,
            stages: Vec::new(),
            infinite,
        }
    }

    // ================================
    // Constructors
    // ================================

    /// Wraps a finite source sequence.
    pub fn of<S>(source: S) -> Self
    where
        S: FuturesStream<Item = T> + Send + 'static,
    {
        Self::new(source.boxed(), false)
    }

    /// Creates a stream over the items of an iterator.
    pub fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T> + Send + 'static,
        <I as IntoIterator>::IntoIter: Send,
    {
        Self::new(stream::iter(iter).boxed(), false)
    }

    /// Creates a stream that completes immediately.
    pub fn empty() -> Self {
        Self::new(stream::empty().boxed(), false)
    }

    /// Produces the unbounded sequence `seed, f(seed), f(f(seed)), ...`.
    ///
    /// The resulting stream is flagged infinite and refuses full
    /// materialization until a bounding operation (`take`, `take_until`,
    /// `take_while`) has been applied.
    pub fn iterate<F>(seed: T, mut f: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> T + Send + 'static,
    {
        let source = stream! {
            let mut current = seed;
            loop {
                yield current.clone();
                current = f(&current);
            }
        }
        .boxed();
        Self::new(source, true)
    }

    // ================================
    // Lazy stage registration
    // ================================

    /// Appends a transform stage; no iteration happens until a terminal
    /// operation runs. Stages accumulate in registration order.
    pub fn map<F>(mut self, f: F) -> Self
    where
        F: FnMut(T) -> T + Send + 'static,
    {
        self.stages.push(Stage::map(f));
        self
    }

    /// Appends a stage that re-evaluates acceptance against the predicate
    /// without altering the value.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.stages.push(Stage::filter(predicate));
        self
    }

    /// Projects every accepted value into another type via its `From`
    /// conversion. The projection is lazy: the current pipeline becomes the
    /// source of a fresh stream, and the infinite flag carries over.
    pub fn map_into<U>(self) -> Stream<U>
    where
        U: From<T> + Send + 'static,
    {
        let infinite = self.infinite;
        let mut accepted = self.into_accepted();
        let source = stream! {
            while let Some(value) = accepted.next().await {
                yield U::from(value);
            }
        }
        .boxed();
        Stream::new(source, infinite)
    }

    // ================================
    // Bounding operations
    // ================================

    /// Bounds the source to at most its first `count` elements.
    pub fn take(mut self, count: usize) -> Self {
        self.infinite = false;
        let mut source = self.source;
        self.source = stream! {
            let mut taken = 0usize;
            while taken < count {
                match source.next().await {
                    Some(value) => {
                        taken += 1;
                        yield value;
                    }
                    None => break,
                }
            }
        }
        .boxed();
        self
    }

    /// Pulls from the source until the predicate matches; the matching
    /// element is excluded.
    pub fn take_until<F>(self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.take_until_cond(Condition::when(predicate))
    }

    /// Pulls from the source until an element equal to `value` shows up; the
    /// matching element is excluded.
    pub fn take_until_value(self, value: T) -> Self
    where
        T: PartialEq + fmt::Debug,
    {
        self.take_until_cond(Condition::equals(value))
    }

    fn take_until_cond(mut self, mut condition: Condition<T>) -> Self {
        self.infinite = false;
        let mut source = self.source;
        self.source = stream! {
            while let Some(value) = source.next().await {
                if condition.test(&value) {
                    break;
                }
                yield value;
            }
        }
        .boxed();
        self
    }

    /// Yields elements while the predicate holds and stops at the first
    /// non-match.
    pub fn take_while<F>(self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.take_while_cond(Condition::when(predicate))
    }

    /// Yields elements equal to `value` and stops at the first other element.
    pub fn take_while_value(self, value: T) -> Self
    where
        T: PartialEq + fmt::Debug,
    {
        self.take_while_cond(Condition::equals(value))
    }

    fn take_while_cond(mut self, mut condition: Condition<T>) -> Self {
        self.infinite = false;
        let mut source = self.source;
        self.source = stream! {
            while let Some(value) = source.next().await {
                if !condition.test(&value) {
                    break;
                }
                yield value;
            }
        }
        .boxed();
        self
    }

    /// Leaky variant of [`take_while`](Stream::take_while): yields matching
    /// elements but keeps pulling past non-matching ones, so it never
    /// terminates the source on its own. It behaves like a source-level
    /// filter and therefore does NOT count as a bounding operation; the
    /// infinite flag is left untouched.
    pub fn take_while_leaky<F>(mut self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        let mut source = self.source;
        self.source = stream! {
            while let Some(value) = source.next().await {
                if predicate(&value) {
                    yield value;
                }
            }
        }
        .boxed();
        self
    }

    /// Discards the first `count` elements, then yields the rest. Skipping
    /// does not bound the source, so the infinite flag is left untouched.
    pub fn skip(mut self, count: usize) -> Self {
        let mut source = self.source;
        self.source = stream! {
            let mut skipped = 0usize;
            while let Some(value) = source.next().await {
                if skipped < count {
                    skipped += 1;
                    continue;
                }
                yield value;
            }
        }
        .boxed();
        self
    }

    /// Keeps the stream open only while the current wall-clock time precedes
    /// `deadline`; the deadline is re-checked on every pull.
    pub fn take_until_timeout(self, deadline: DateTime<Utc>) -> Self {
        self.take_while_cond(Condition::when(move |_| Utc::now() < deadline))
    }

    /// Keeps the stream open for `window` from the moment of registration,
    /// measured on the monotonic clock.
    pub fn take_for(self, window: Duration) -> Self {
        let deadline = tokio::time::Instant::now() + window;
        self.take_while_cond(Condition::when(move |_| {
            tokio::time::Instant::now() < deadline
        }))
    }

    // ================================
    // Terminal operations
    // ================================

    /// Hands the lazy sequence of accepted, transformed values to a
    /// collector and returns whatever it materializes. This is the primitive
    /// every other full-materialization terminal builds on.
    pub async fn collect<C>(self, collector: C) -> StreamResult<C::Output>
    where
        C: Collector<T>,
    {
        self.throw_if_unsafe()?;
        Ok(collector.collect(self.into_accepted()).await)
    }

    /// Materializes every accepted, transformed value into a `Vec`.
    pub async fn to_vec(self) -> StreamResult<Vec<T>> {
        self.collect(VecCollector).await
    }

    /// Folds accepted values left to right from an explicit identity.
    pub async fn reduce<A, F>(self, identity: A, reducer: F) -> StreamResult<A>
    where
        A: Send + 'static,
        F: FnMut(A, T) -> A + Send + 'static,
    {
        self.collect(ReduceCollector::new(identity, reducer)).await
    }

    /// Applies the callback to every accepted, transformed value in pull
    /// order.
    pub async fn each<F>(self, mut callback: F) -> StreamResult<()>
    where
        F: FnMut(T),
    {
        self.throw_if_unsafe()?;
        let mut accepted = self.into_accepted();
        while let Some(value) = accepted.next().await {
            callback(value);
        }
        Ok(())
    }

    /// Returns the first accepted, transformed value, if any.
    ///
    /// No unbounded-stream guard applies: the pass stops at the first
    /// accepted value. On an unbounded source where nothing is ever
    /// accepted, this pulls forever; bounding the stream first is the
    /// caller's responsibility.
    pub async fn first(self) -> Option<T> {
        let mut accepted = self.into_accepted();
        accepted.next().await
    }

    /// Returns the first accepted value, or `default` when the source
    /// exhausts with none accepted.
    pub async fn first_or(self, default: T) -> T {
        self.first().await.unwrap_or(default)
    }

    /// Returns the first accepted value, or the result of `default` when the
    /// source exhausts with none accepted.
    pub async fn first_or_else<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.first().await.unwrap_or_else(default)
    }

    /// Scans accepted values for the first one matching the predicate. The
    /// predicate applies after the pipeline, to the transformed value.
    pub async fn first_where<F>(self, predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.first_where_cond(Condition::when(predicate)).await
    }

    /// Scans accepted values for the first one equal to `value`.
    pub async fn first_where_value(self, value: T) -> Option<T>
    where
        T: PartialEq + fmt::Debug,
    {
        self.first_where_cond(Condition::equals(value)).await
    }

    async fn first_where_cond(self, mut condition: Condition<T>) -> Option<T> {
        let mut accepted = self.into_accepted();
        while let Some(value) = accepted.next().await {
            if condition.test(&value) {
                return Some(value);
            }
        }
        None
    }

    /// As [`first_where`](Stream::first_where), but fails with
    /// [`StreamError::ValueNotFound`] when the source exhausts without a
    /// match.
    pub async fn first_or_fail<F>(self, predicate: F) -> StreamResult<T>
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.first_or_fail_cond(Condition::when(predicate)).await
    }

    /// As [`first_where_value`](Stream::first_where_value), but fails with
    /// [`StreamError::ValueNotFound`] when the source exhausts without a
    /// match.
    pub async fn first_or_fail_value(self, value: T) -> StreamResult<T>
    where
        T: PartialEq + fmt::Debug,
    {
        self.first_or_fail_cond(Condition::equals(value)).await
    }

    async fn first_or_fail_cond(self, condition: Condition<T>) -> StreamResult<T> {
        let criterion = condition.describe();
        self.first_where_cond(condition)
            .await
            .ok_or(StreamError::ValueNotFound(criterion))
    }

    /// Consumes the entire remaining source and returns the last accepted,
    /// transformed value, if any.
    pub async fn last(self) -> StreamResult<Option<T>> {
        self.throw_if_unsafe()?;
        let mut accepted = self.into_accepted();
        let mut last = None;
        while let Some(value) = accepted.next().await {
            last = Some(value);
        }
        Ok(last)
    }

    // ================================
    // Internals
    // ================================

    /// Whether the source has no defined end. True only for streams built
    /// with [`iterate`](Stream::iterate) that have not been bounded yet.
    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    /// The lazy sequence of accepted, transformed values: one pass over the
    /// source, each element pushed through the composed stage pipeline,
    /// rejected elements dropped.
    pub(crate) fn into_accepted(self) -> StreamSource<T> {
        let Stream {
            mut source,
            mut stages,
            ..
        } = self;
        stream! {
            while let Some(value) = source.next().await {
                let output = run_pipeline(&mut stages, StreamInput::wrap(value));
                if output.accepts() {
                    yield output.into_value();
                }
            }
        }
        .boxed()
    }

    fn throw_if_unsafe(&self) -> StreamResult<()> {
        if self.infinite {
            log::warn!("refusing full materialization of an unbounded stream");
            return Err(StreamError::UnsafeStream);
        }
        Ok(())
    }
}

impl Stream<i64> {
    /// Creates a stream over the inclusive arithmetic sequence from `start`
    /// to `end` with step `1`.
    pub fn range(start: i64, end: i64) -> StreamResult<Self> {
        Self::range_step(start, end, 1)
    }

    /// Creates a stream over the inclusive arithmetic sequence from `start`
    /// to `end`, stepping by `step`. Fails with
    /// [`StreamError::InvalidRange`] when the step can never reach `end`.
    pub fn range_step(start: i64, end: i64, step: i64) -> StreamResult<Self> {
        if step == 0 || (end > start && step < 0) || (end < start && step > 0) {
            return Err(StreamError::InvalidRange { start, end, step });
        }
        let source = stream! {
            let mut current = start;
            loop {
                if (step > 0 && current > end) || (step < 0 && current < end) {
                    break;
                }
                yield current;
                current = match current.checked_add(step) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        .boxed();
        Ok(Self::new(source, false))
    }
}
