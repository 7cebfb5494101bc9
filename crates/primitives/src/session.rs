//! Session type definitions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// One contiguous activity record for a user.
///
/// Sessions are produced upstream, already sorted per user by
/// `visit_start_time`. The positive label instant is derived upstream as well;
/// this crate never decides what counts as a positive event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Upstream session identifier.
    pub session_id: String,
    /// Start of the visit.
    pub visit_start_time: Timestamp,
    /// Time of the last hit in the visit.
    pub last_hit_time: Timestamp,
    /// Instant of the label-qualifying event in this session, if any.
    pub positive_label_time: Option<Timestamp>,
}

impl Session {
    /// Create a session without a positive label event.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        visit_start_time: Timestamp,
        last_hit_time: Timestamp,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            visit_start_time,
            last_hit_time,
            positive_label_time: None,
        }
    }

    /// Attach the instant of a label-qualifying event.
    #[must_use]
    pub fn with_positive_label_time(mut self, at: Timestamp) -> Self {
        self.positive_label_time = Some(at);
        self
    }

    /// Time between the visit start and the last hit.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.last_hit_time - self.visit_start_time
    }

    /// Whether the last hit does not precede the visit start.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.last_hit_time >= self.visit_start_time
    }

    /// Whether the whole session lies inside the closed interval `[start, end]`.
    #[must_use]
    pub fn is_contained_in(&self, start: Timestamp, end: Timestamp) -> bool {
        self.visit_start_time >= start && self.last_hit_time <= end
    }
}
