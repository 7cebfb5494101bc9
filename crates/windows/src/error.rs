//! Error types for window generation.

use lookback_labels::LabelError;
use lookback_placement::PlacementError;
use lookback_primitives::{TimeDelta, Timestamp, UserId};
use lookback_traits::SinkError;

/// Configuration errors, raised before any user is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Window duration is zero or negative.
    #[error("window duration must be positive, got {0}")]
    NonPositiveWindow(TimeDelta),

    /// Snapshot start is not before snapshot end.
    #[error("snapshot start {start} must be before snapshot end {end}")]
    InvalidSnapshotRange {
        /// Snapshot start.
        start: Timestamp,
        /// Snapshot end.
        end: Timestamp,
    },

    /// Minimum lookahead exceeds maximum lookahead.
    #[error("minimum lookahead {min} exceeds maximum lookahead {max}")]
    InvalidLookahead {
        /// Minimum lookahead.
        min: TimeDelta,
        /// Maximum lookahead.
        max: TimeDelta,
    },

    /// Derived instants fall outside the representable time range.
    #[error("time arithmetic overflows for {0}")]
    TimeOverflow(&'static str),

    /// Placement error.
    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),

    /// Unparseable date parameter.
    #[error("invalid date for {field}: {value:?}")]
    InvalidDate {
        /// Parameter name.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// Duration parameter out of range.
    #[error("duration out of range for {field}: {seconds}s")]
    DurationOutOfRange {
        /// Parameter name.
        field: &'static str,
        /// Raw value in seconds.
        seconds: i64,
    },
}

/// Errors that can occur while generating windows.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Label collection error.
    #[error("label error: {0}")]
    Label(#[from] LabelError),

    /// Sessions are not sorted by visit start.
    #[error("session {index} of user {user_id} starts before the session preceding it")]
    UnsortedSessions {
        /// Offending user.
        user_id: UserId,
        /// Index of the first out-of-order session.
        index: usize,
    },

    /// A session's last hit precedes its visit start.
    #[error("session {index} of user {user_id} ends before it starts")]
    InvalidSession {
        /// Offending user.
        user_id: UserId,
        /// Index of the malformed session.
        index: usize,
    },

    /// Worker pool could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// Sink error.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
}

impl WindowError {
    /// Returns whether other users can still be processed after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::UnsortedSessions { .. } | Self::InvalidSession { .. } => true,
            Self::Sink(err) => err.is_recoverable(),
            _ => false,
        }
    }

    /// Returns the user the error is attributed to, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::UnsortedSessions { user_id, .. } | Self::InvalidSession { user_id, .. } => {
                Some(user_id)
            }
            _ => None,
        }
    }
}
