//! Error types for label annotation.

use lookback_primitives::Timestamp;

/// Errors that can occur while collecting label instants.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// Range start lies after range end.
    #[error("invalid label range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested range start.
        start: Timestamp,
        /// Requested range end.
        end: Timestamp,
    },
}
