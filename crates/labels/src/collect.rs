//! Positive label instant collection.

use lookback_primitives::{Session, Timestamp};

use crate::{LabelError, first_instant_in_interval};

/// Collect the positive label instants of a user's sessions.
///
/// Sessions without a positive event, and events outside the closed range
/// `[range_start, range_end]`, are discarded. Intended to run once per user;
/// every window of that user then queries the result.
///
/// # Arguments
/// * `sessions` - One user's sessions
/// * `range_start` - Inclusive lower bound (typically the snapshot start)
/// * `range_end` - Inclusive upper bound (typically the snapshot end)
///
/// # Returns
/// Label instants in ascending order. Equal instants from different sessions
/// are all kept.
///
/// # Errors
/// Returns `LabelError::InvalidRange` if `range_start` is after `range_end`.
pub fn collect_positive_label_times(
    sessions: &[Session],
    range_start: Timestamp,
    range_end: Timestamp,
) -> Result<Vec<Timestamp>, LabelError> {
    if range_start > range_end {
        return Err(LabelError::InvalidRange { start: range_start, end: range_end });
    }

    let mut times: Vec<Timestamp> = sessions
        .iter()
        .filter_map(|s| s.positive_label_time)
        .filter(|t| (range_start..=range_end).contains(t))
        .collect();

    // Input is usually already ordered, which keeps this near-linear.
    times.sort_unstable();
    Ok(times)
}

/// Sorted positive label instants for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTimes {
    instants: Vec<Timestamp>,
}

impl LabelTimes {
    /// Collect label instants from sessions within a closed range.
    ///
    /// # Errors
    /// Returns `LabelError::InvalidRange` if `range_start` is after `range_end`.
    pub fn collect(
        sessions: &[Session],
        range_start: Timestamp,
        range_end: Timestamp,
    ) -> Result<Self, LabelError> {
        collect_positive_label_times(sessions, range_start, range_end)
            .map(|instants| Self { instants })
    }

    /// Build from instants in any order.
    #[must_use]
    pub fn from_unsorted(mut instants: Vec<Timestamp>) -> Self {
        instants.sort_unstable();
        Self { instants }
    }

    /// First instant in `(lo, hi]`.
    #[must_use]
    pub fn first_in(&self, lo: Timestamp, hi: Timestamp) -> Option<Timestamp> {
        first_instant_in_interval(&self.instants, lo, hi)
    }

    /// Whether any instant lies in `(lo, hi]`.
    #[must_use]
    pub fn contains_in(&self, lo: Timestamp, hi: Timestamp) -> bool {
        self.first_in(lo, hi).is_some()
    }

    /// Number of instants.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.instants.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// The instants in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[Timestamp] {
        &self.instants
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::*;

    fn day(n: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(n)
    }

    fn session(n: i64, label: Option<i64>) -> Session {
        let s = Session::new(format!("s{n}"), day(n), day(n) + TimeDelta::hours(1));
        match label {
            Some(l) => s.with_positive_label_time(day(l)),
            None => s,
        }
    }

    #[test]
    fn collects_only_labeled_sessions() {
        let sessions = vec![session(1, None), session(2, Some(2)), session(3, None)];
        let times = collect_positive_label_times(&sessions, day(0), day(10)).unwrap();
        assert_eq!(times, vec![day(2)]);
    }

    #[test]
    fn discards_out_of_range_instants() {
        let sessions = vec![session(0, Some(0)), session(5, Some(5)), session(9, Some(9))];
        let times = collect_positive_label_times(&sessions, day(1), day(8)).unwrap();
        assert_eq!(times, vec![day(5)]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let sessions = vec![session(1, Some(1)), session(8, Some(8))];
        let times = collect_positive_label_times(&sessions, day(1), day(8)).unwrap();
        assert_eq!(times, vec![day(1), day(8)]);
    }

    #[test]
    fn result_is_sorted_and_keeps_duplicates() {
        let sessions = vec![session(1, Some(6)), session(2, Some(3)), session(3, Some(3))];
        let times = collect_positive_label_times(&sessions, day(0), day(10)).unwrap();
        assert_eq!(times, vec![day(3), day(3), day(6)]);
    }

    #[test]
    fn empty_sessions_give_no_instants() {
        let times = collect_positive_label_times(&[], day(0), day(10)).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn inverted_range_errors() {
        let result = collect_positive_label_times(&[], day(5), day(1));
        assert!(matches!(result, Err(LabelError::InvalidRange { .. })));
    }

    #[test]
    fn label_times_queries() {
        let sessions = vec![session(1, Some(2)), session(4, Some(4))];
        let labels = LabelTimes::collect(&sessions, day(0), day(10)).unwrap();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.first_in(day(2), day(10)), Some(day(4)));
        assert!(labels.contains_in(day(1), day(2)));
        assert!(!labels.contains_in(day(4), day(10)));
    }

    #[test]
    fn label_times_from_unsorted() {
        let labels = LabelTimes::from_unsorted(vec![day(3), day(1), day(2)]);
        assert_eq!(labels.as_slice(), &[day(1), day(2), day(3)]);
        assert!(!labels.is_empty());
        assert!(LabelTimes::default().is_empty());
    }
}
