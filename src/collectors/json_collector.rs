//! JSON-materializing collector

use async_trait::async_trait;
use futures_util::stream::StreamExt;
use serde::Serialize;
use serde_json::Value;

use super::Collector;
use crate::stream::StreamSource;

/// Collects every value of the sequence into a JSON array.
pub struct JsonCollector;

#[async_trait]
impl<T> Collector<T> for JsonCollector
where
    T: Serialize + Send + 'static,
{
    type Output = serde_json::Result<Value>;

    async fn collect(self, mut source: StreamSource<T>) -> Self::Output {
        let mut items = Vec::new();
        while let Some(value) = source.next().await {
            items.push(serde_json::to_value(&value)?);
        }
        Ok(Value::Array(items))
    }
}
