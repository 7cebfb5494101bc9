//! Error types for window placement.

use lookback_primitives::TimeDelta;

/// Errors that can occur while building a placement.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// Slide step is zero or negative.
    #[error("slide duration must be positive, got {0}")]
    NonPositiveSlide(TimeDelta),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlacementError::NonPositiveSlide(TimeDelta::zero());
        assert!(err.to_string().contains("must be positive"));
    }
}
