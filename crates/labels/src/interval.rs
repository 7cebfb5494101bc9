//! Lookahead interval queries over sorted label instants.

use lookback_primitives::Timestamp;

/// Find the first instant in the half-open interval `(lo, hi]`.
///
/// # Arguments
/// * `sorted` - Label instants in ascending order
/// * `lo` - Exclusive lower bound
/// * `hi` - Inclusive upper bound
///
/// # Returns
/// The smallest instant `t` with `lo < t <= hi`, or `None`.
#[must_use]
pub fn first_instant_in_interval(
    sorted: &[Timestamp],
    lo: Timestamp,
    hi: Timestamp,
) -> Option<Timestamp> {
    let idx = sorted.partition_point(|t| *t <= lo);
    sorted.get(idx).copied().filter(|t| *t <= hi)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use rstest::rstest;

    use super::*;

    fn day(n: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::days(n)
    }

    fn linear_scan(sorted: &[Timestamp], lo: Timestamp, hi: Timestamp) -> Option<Timestamp> {
        sorted.iter().copied().find(|t| lo < *t && *t <= hi)
    }

    #[test]
    fn empty_input_has_no_instant() {
        assert_eq!(first_instant_in_interval(&[], day(0), day(10)), None);
    }

    #[test]
    fn lower_bound_is_exclusive() {
        let times = [day(3)];
        assert_eq!(first_instant_in_interval(&times, day(3), day(5)), None);
        assert_eq!(first_instant_in_interval(&times, day(2), day(5)), Some(day(3)));
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let times = [day(5)];
        assert_eq!(first_instant_in_interval(&times, day(0), day(5)), Some(day(5)));
        assert_eq!(first_instant_in_interval(&times, day(0), day(4)), None);
    }

    #[test]
    fn returns_smallest_match_among_duplicates() {
        let times = [day(1), day(4), day(4), day(6)];
        assert_eq!(first_instant_in_interval(&times, day(1), day(10)), Some(day(4)));
    }

    #[test]
    fn inverted_interval_is_empty() {
        let times = [day(1), day(2), day(3)];
        assert_eq!(first_instant_in_interval(&times, day(3), day(1)), None);
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, 2)]
    #[case(1, 1)]
    #[case(2, 7)]
    #[case(4, 5)]
    #[case(7, 20)]
    #[case(9, 20)]
    fn binary_search_matches_linear_scan(#[case] lo: i64, #[case] hi: i64) {
        let times = [day(0), day(2), day(2), day(5), day(7), day(9)];
        assert_eq!(
            first_instant_in_interval(&times, day(lo), day(hi)),
            linear_scan(&times, day(lo), day(hi))
        );
    }
}
