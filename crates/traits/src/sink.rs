//! Window sink trait definitions.

use lookback_primitives::{LookbackWindow, UserId};

/// Errors a sink can report while accepting windows.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink refused a window.
    #[error("window for user {user_id} rejected: {reason}")]
    Rejected {
        /// Owner of the rejected window.
        user_id: UserId,
        /// Why the sink refused it.
        reason: String,
    },

    /// The sink no longer accepts windows.
    #[error("sink closed")]
    Closed,
}

impl SinkError {
    /// Returns whether later windows may still be accepted.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Consumer of emitted windows.
///
/// Windows for one user arrive in emission order; windows of different users
/// may be interleaved in any order.
pub trait WindowSink {
    /// Take ownership of one window.
    ///
    /// # Errors
    /// Returns `SinkError` if the window cannot be accepted.
    fn accept(&mut self, window: LookbackWindow) -> Result<(), SinkError>;

    /// Flush buffered windows.
    ///
    /// # Errors
    /// Returns `SinkError` if buffered windows cannot be delivered.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl WindowSink for Vec<LookbackWindow> {
    fn accept(&mut self, window: LookbackWindow) -> Result<(), SinkError> {
        self.push(window);
        Ok(())
    }
}
