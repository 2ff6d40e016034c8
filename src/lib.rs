//! streamlet - a lazy, pull-based stream pipeline library
//!
//! A [`Stream`] wraps a source sequence and accumulates map/filter stages
//! without iterating; terminal operations drive exactly one pass. Bounding
//! operations rewrap the source itself, which makes unbounded sources
//! (built with [`Stream::iterate`]) safe to traverse. The chunking
//! [`StreamCollector`](collectors::StreamCollector) regroups a stream into a
//! [`StreamStream`] of fixed-size chunk streams.
//!
//! ```
//! use streamlet::Stream;
//!
//! # async fn example() {
//! let sum = Stream::range(1, 10)
//!     .unwrap()
//!     .filter(|value| value % 2 == 0)
//!     .reduce(0, |carry, value| carry + value)
//!     .await
//!     .unwrap();
//! assert_eq!(sum, 30);
//! # }
//! ```

pub mod collectors;
pub mod condition;
pub mod error;
pub mod input;
pub mod operator;
pub mod stream;
pub mod stream_stream;

// Re-export the core types at the crate root
pub use collectors::{Collector, JsonCollector, ReduceCollector, StreamCollector, VecCollector};
pub use condition::Condition;
pub use error::{StreamError, StreamResult};
pub use input::{Acceptance, StreamInput};
pub use operator::{Operator, Stage};
pub use stream::{Stream, StreamSource};
pub use stream_stream::StreamStream;
