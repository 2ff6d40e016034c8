//! Error types for stream operations
//!
//! Every fallible stream operation reports through [`StreamError`]; there is
//! no retry or recovery layer, errors propagate synchronously to the caller.

use thiserror::Error;

use crate::collectors::StreamCollector;

/// Main error type for stream operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// A full-materialization terminal was invoked on an unbounded stream
    #[error("stream source is unsafe, stream is infinite; call take(n) to process a finite number of source items")]
    UnsafeStream,
    /// Range parameters that can never reach the end bound
    #[error("invalid range: step {step} can never reach {end} from {start}")]
    InvalidRange { start: i64, end: i64, step: i64 },
    /// No stream value satisfied the lookup criterion
    #[error("no stream value found matching {0}")]
    ValueNotFound(String),
    /// Requested chunk size is out of bounds
    #[error(
        "for performance reasons chunk size is limited to {limit}, got {requested}",
        limit = StreamCollector::SIZE_LIMIT,
        requested = .0
    )]
    ChunkSizeExceeded(usize),
}

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(StreamError::UnsafeStream.to_string().contains("take(n)"));
        assert_eq!(
            StreamError::InvalidRange {
                start: 1,
                end: 10,
                step: -1
            }
            .to_string(),
            "invalid range: step -1 can never reach 10 from 1"
        );
        assert!(StreamError::ChunkSizeExceeded(600)
            .to_string()
            .contains("512"));
    }
}
