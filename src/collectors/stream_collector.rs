//! Chunking collector
//!
//! Regroups a sequence into fixed-size chunks, each one materialized eagerly
//! as its own [`Stream`], and hands the sequence of chunk streams to a
//! [`StreamStream`].

use std::mem;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

use super::Collector;
use crate::error::{StreamError, StreamResult};
use crate::stream::{Stream, StreamSource};
use crate::stream_stream::StreamStream;

/// Collects the sequence into chunks of at most `size` elements.
pub struct StreamCollector {
    size: usize,
}

impl StreamCollector {
    /// Hard cap on the chunk size a collector may be asked for.
    pub const SIZE_LIMIT: usize = 512;

    /// Creates a collector sealing chunks of `size` elements. A `size` of
    /// zero falls back to [`SIZE_LIMIT`](StreamCollector::SIZE_LIMIT);
    /// anything above the cap fails with
    /// [`StreamError::ChunkSizeExceeded`].
    pub fn new(size: usize) -> StreamResult<Self> {
        if size > Self::SIZE_LIMIT {
            return Err(StreamError::ChunkSizeExceeded(size));
        }
        Ok(Self {
            size: if size == 0 { Self::SIZE_LIMIT } else { size },
        })
    }
}

impl Default for StreamCollector {
    fn default() -> Self {
        Self {
            size: Self::SIZE_LIMIT,
        }
    }
}

#[async_trait]
impl<T: Send + 'static> Collector<T> for StreamCollector {
    type Output = StreamStream<T>;

    async fn collect(self, mut source: StreamSource<T>) -> StreamStream<T> {
        let mut chunks: Vec<Stream<T>> = Vec::new();
        let mut buffer: Vec<T> = Vec::with_capacity(self.size);
        while let Some(value) = source.next().await {
            buffer.push(value);
            if buffer.len() == self.size {
                log::debug!("sealing chunk #{} ({} elements)", chunks.len(), buffer.len());
                let sealed = mem::replace(&mut buffer, Vec::with_capacity(self.size));
                chunks.push(Stream::from_iter(sealed));
            }
        }
        if !buffer.is_empty() {
            log::debug!(
                "sealing trailing chunk #{} ({} elements)",
                chunks.len(),
                buffer.len()
            );
            chunks.push(Stream::from_iter(buffer));
        }
        StreamStream::new(stream::iter(chunks).boxed())
    }
}
