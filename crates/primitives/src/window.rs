//! Lookback window type definitions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::{Session, Timestamp, UserId};

/// A fixed-length historical slice of one user's sessions with a
/// future-looking binary label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackWindow {
    /// User the window belongs to.
    pub user_id: UserId,
    /// Inclusive window start.
    pub start_time: Timestamp,
    /// Inclusive window end.
    pub end_time: Timestamp,
    /// Decision instant: `end_time` plus the lookback gap.
    pub effective_date: Timestamp,
    /// Start of the user's earliest known session.
    pub first_activity_time: Timestamp,
    /// Sessions fully contained in `[start_time, end_time]`, in input order.
    pub sessions: Vec<Session>,
    /// Whether a positive event falls in the lookahead interval.
    pub prediction_label: bool,
}

impl LookbackWindow {
    /// Create an empty, negatively labeled window.
    ///
    /// # Arguments
    /// * `user_id` - Owning user
    /// * `start_time` - Window start
    /// * `window_duration` - Span of the window
    /// * `lookback_gap` - Offset from the window end to the effective date
    /// * `first_activity_time` - Start of the user's first session
    #[must_use]
    pub fn new(
        user_id: UserId,
        start_time: Timestamp,
        window_duration: TimeDelta,
        lookback_gap: TimeDelta,
        first_activity_time: Timestamp,
    ) -> Self {
        let end_time = start_time + window_duration;
        Self {
            user_id,
            start_time,
            end_time,
            effective_date: end_time + lookback_gap,
            first_activity_time,
            sessions: Vec::new(),
            prediction_label: false,
        }
    }

    /// Span between start and end.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Number of sessions in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if the window holds no sessions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Gap between the window end and its effective date.
    #[must_use]
    pub fn lookback_gap(&self) -> TimeDelta {
        self.effective_date - self.end_time
    }
}
