//! Runtime-selected placement.

use lookback_primitives::{TimeDelta, Timestamp};
use lookback_traits::{PlacementKind, WindowPlacement};

use crate::{FixedPlacement, PlacementError, SlidingPlacement};

/// Either placement variant, for callers that choose it from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Single candidate window.
    Fixed(FixedPlacement),
    /// Candidates advancing by a slide.
    Sliding(SlidingPlacement),
}

impl Placement {
    /// Fixed placement.
    #[must_use]
    pub const fn fixed() -> Self {
        Self::Fixed(FixedPlacement::new())
    }

    /// Sliding placement with the given slide.
    ///
    /// # Errors
    /// Returns `PlacementError::NonPositiveSlide` if `slide` is zero or negative.
    pub fn sliding(slide: TimeDelta) -> Result<Self, PlacementError> {
        SlidingPlacement::new(slide).map(Self::Sliding)
    }

    /// Sliding when a slide is given, fixed otherwise.
    ///
    /// # Errors
    /// Returns `PlacementError::NonPositiveSlide` if `slide` is zero or negative.
    pub fn from_slide(slide: Option<TimeDelta>) -> Result<Self, PlacementError> {
        slide.map_or_else(|| Ok(Self::fixed()), Self::sliding)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::fixed()
    }
}

impl WindowPlacement for Placement {
    fn kind(&self) -> PlacementKind {
        match self {
            Self::Fixed(p) => p.kind(),
            Self::Sliding(p) => p.kind(),
        }
    }

    fn next_start(&self, previous: Timestamp) -> Option<Timestamp> {
        match self {
            Self::Fixed(p) => p.next_start(previous),
            Self::Sliding(p) => p.next_start(previous),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn from_slide_selects_variant() {
        assert_eq!(Placement::from_slide(None).unwrap().kind(), PlacementKind::Fixed);
        assert_eq!(
            Placement::from_slide(Some(TimeDelta::days(1))).unwrap().kind(),
            PlacementKind::Sliding
        );
        assert!(Placement::from_slide(Some(TimeDelta::zero())).is_err());
    }

    #[test]
    fn placement_delegates_next_start() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let sliding = Placement::sliding(TimeDelta::days(2)).unwrap();
        assert_eq!(sliding.next_start(t), Some(t + TimeDelta::days(2)));
        assert_eq!(Placement::default().next_start(t), None);
    }
}
