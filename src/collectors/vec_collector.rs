//! Vec-materializing collector

use async_trait::async_trait;
use futures_util::stream::StreamExt;

use super::Collector;
use crate::stream::StreamSource;

/// Collects every value of the sequence into a `Vec`, in pull order.
pub struct VecCollector;

#[async_trait]
impl<T: Send + 'static> Collector<T> for VecCollector {
    type Output = Vec<T>;

    async fn collect(self, source: StreamSource<T>) -> Vec<T> {
        source.collect().await
    }
}
