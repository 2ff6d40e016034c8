//! Stream of chunk streams
//!
//! A [`StreamStream`] is a stream whose elements are themselves streams: the
//! output of the chunking [`StreamCollector`](crate::collectors::StreamCollector).
//! Its `map` and `filter` push the corresponding stage down into each chunk
//! lazily, so chunk boundaries survive transformation, and its `reduce` folds
//! across chunks by threading the running accumulator into each chunk as that
//! chunk's identity.

use std::sync::Arc;

use futures_util::stream::StreamExt;

use crate::error::StreamResult;
use crate::stream::{Stream, StreamSource};

/// A stream over an ordered sequence of chunk streams.
pub struct StreamStream<T: Send + 'static> {
    inner: Stream<Stream<T>>,
}

impl<T: Send + 'static> StreamStream<T> {
    /// Wraps an ordered sequence of chunk streams.
    pub fn new(chunks: StreamSource<Stream<T>>) -> Self {
        Self {
            inner: Stream::of(chunks),
        }
    }

    /// Pushes the transform down into each chunk; every chunk becomes
    /// `chunk.map(f)`, lazily.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self {
            inner: self.inner.map(move |chunk| {
                let f = Arc::clone(&f);
                chunk.map(move |value| f(value))
            }),
        }
    }

    /// Pushes the predicate down into each chunk; every chunk becomes
    /// `chunk.filter(predicate)`, lazily. Chunk boundaries are preserved.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        Self {
            inner: self.inner.map(move |chunk| {
                let predicate = Arc::clone(&predicate);
                chunk.filter(move |value| predicate(value))
            }),
        }
    }

    /// Bounds the sequence to its first `count` chunks.
    pub fn take(self, count: usize) -> Self {
        Self {
            inner: self.inner.take(count),
        }
    }

    /// Discards the first `count` chunks.
    pub fn skip(self, count: usize) -> Self {
        Self {
            inner: self.inner.skip(count),
        }
    }

    /// Folds every value of every chunk left to right: the accumulator runs
    /// through each chunk in order, entering it as that chunk's identity, so
    /// the nested structure reduces to a flat result without flattening
    /// first.
    pub async fn reduce<A, F>(self, identity: A, mut reducer: F) -> StreamResult<A>
    where
        A: Send + 'static,
        F: FnMut(A, T) -> A + Send,
    {
        let mut chunks = self.inner.into_accepted();
        let mut accumulator = identity;
        while let Some(chunk) = chunks.next().await {
            let mut values = chunk.into_accepted();
            while let Some(value) = values.next().await {
                accumulator = reducer(accumulator, value);
            }
        }
        Ok(accumulator)
    }

    /// Materializes every chunk to its own `Vec`, producing one `Vec` per
    /// chunk.
    pub async fn to_vec(self) -> StreamResult<Vec<Vec<T>>> {
        let mut chunks = self.inner.into_accepted();
        let mut output = Vec::new();
        while let Some(chunk) = chunks.next().await {
            output.push(chunk.to_vec().await?);
        }
        Ok(output)
    }

    /// Returns the first chunk, with any pushed-down stages applied.
    pub async fn first(self) -> Option<Stream<T>> {
        self.inner.first().await
    }

    /// Applies the callback to every chunk in order.
    pub async fn each<F>(self, callback: F) -> StreamResult<()>
    where
        F: FnMut(Stream<T>),
    {
        self.inner.each(callback).await
    }
}
