//! Fixed window placement.

use lookback_primitives::Timestamp;
use lookback_traits::{PlacementKind, WindowPlacement};

/// Single-shot placement.
///
/// Only the first candidate, anchored so that its effective date equals the
/// snapshot start, is ever considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPlacement;

impl FixedPlacement {
    /// Create a fixed placement.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl WindowPlacement for FixedPlacement {
    fn kind(&self) -> PlacementKind {
        PlacementKind::Fixed
    }

    fn next_start(&self, _previous: Timestamp) -> Option<Timestamp> {
        None
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn fixed_placement_is_single_shot() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let placement = FixedPlacement::new();
        assert_eq!(placement.next_start(t), None);
        assert_eq!(placement.kind(), PlacementKind::Fixed);
        assert_eq!(placement.name(), "fixed");
    }
}
