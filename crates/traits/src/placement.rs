//! Window placement trait definitions.

use lookback_primitives::Timestamp;

/// The kind of window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// A single window anchored to the snapshot start.
    Fixed,
    /// A sequence of windows advancing by a fixed step.
    Sliding,
}

impl std::fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Sliding => write!(f, "sliding"),
        }
    }
}

/// Strategy producing successive candidate window starts.
///
/// The first candidate is always derived from the snapshot bounds by the
/// generator; the strategy only decides what follows a given start.
pub trait WindowPlacement: Send + Sync {
    /// Returns the kind of placement.
    fn kind(&self) -> PlacementKind;

    /// Returns the candidate start following `previous`, or `None` once the
    /// strategy is exhausted.
    ///
    /// Implementations must return strictly increasing starts.
    fn next_start(&self, previous: Timestamp) -> Option<Timestamp>;

    /// Returns the name of this placement.
    fn name(&self) -> &str {
        match self.kind() {
            PlacementKind::Fixed => "fixed",
            PlacementKind::Sliding => "sliding",
        }
    }
}
