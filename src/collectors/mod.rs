//! Collectors for materializing lazy stream output
//!
//! A collector consumes the lazy sequence of accepted, transformed values a
//! stream produces and materializes a result. `Stream::collect` is the sole
//! hookup point between the stream core and collector implementations.

pub mod json_collector;
pub mod reduce_collector;
pub mod stream_collector;
pub mod vec_collector;

// Re-export collector implementations
pub use json_collector::JsonCollector;
pub use reduce_collector::ReduceCollector;
pub use stream_collector::StreamCollector;
pub use vec_collector::VecCollector;

use async_trait::async_trait;

use crate::stream::StreamSource;

/// Consumes a lazily-produced sequence and materializes a result.
#[async_trait]
pub trait Collector<T: Send + 'static>: Send {
    type Output;

    /// Drives the source to completion and produces the materialized result.
    async fn collect(self, source: StreamSource<T>) -> Self::Output;
}
