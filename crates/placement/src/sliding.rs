//! Sliding window placement.

use lookback_primitives::{TimeDelta, Timestamp};
use lookback_traits::{PlacementKind, WindowPlacement};

use crate::PlacementError;

/// Placement whose candidate starts advance by a fixed slide.
///
/// Slides shorter than the window produce overlapping windows; longer slides
/// leave gaps between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingPlacement {
    slide: TimeDelta,
}

impl SlidingPlacement {
    /// Create a sliding placement.
    ///
    /// # Errors
    /// Returns `PlacementError::NonPositiveSlide` if `slide` is zero or negative.
    pub fn new(slide: TimeDelta) -> Result<Self, PlacementError> {
        if slide <= TimeDelta::zero() {
            return Err(PlacementError::NonPositiveSlide(slide));
        }
        Ok(Self { slide })
    }

    /// Step between successive candidate starts.
    #[must_use]
    pub const fn slide(&self) -> TimeDelta {
        self.slide
    }
}

impl WindowPlacement for SlidingPlacement {
    fn kind(&self) -> PlacementKind {
        PlacementKind::Sliding
    }

    fn next_start(&self, previous: Timestamp) -> Option<Timestamp> {
        previous.checked_add_signed(self.slide)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    #[test]
    fn sliding_placement_advances_by_slide() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let placement = SlidingPlacement::new(TimeDelta::hours(6)).unwrap();

        assert_eq!(placement.next_start(t), Some(t + TimeDelta::hours(6)));
        assert_eq!(placement.slide(), TimeDelta::hours(6));
        assert_eq!(placement.name(), "sliding");
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(-86_400)]
    fn non_positive_slide_errors(#[case] seconds: i64) {
        let result = SlidingPlacement::new(TimeDelta::seconds(seconds));
        assert!(matches!(result, Err(PlacementError::NonPositiveSlide(_))));
    }

    #[test]
    fn overflow_ends_the_sequence() {
        let placement = SlidingPlacement::new(TimeDelta::days(1)).unwrap();
        assert_eq!(placement.next_start(Timestamp::MAX_UTC), None);
    }
}
