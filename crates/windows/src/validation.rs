//! Input checks for a user's session list.

use lookback_primitives::{Session, UserId};

use crate::WindowError;

/// Check that a user's sessions are well formed and sorted by visit start.
///
/// Equal visit starts are accepted. The walk relies on both properties, so a
/// violation fails this user only.
///
/// # Errors
/// Returns `WindowError::InvalidSession` for a session whose last hit precedes
/// its start, or `WindowError::UnsortedSessions` for the first session that
/// starts before its predecessor.
pub fn validate_sessions(user_id: &UserId, sessions: &[Session]) -> Result<(), WindowError> {
    if let Some(index) = sessions.iter().position(|s| !s.is_well_formed()) {
        return Err(WindowError::InvalidSession { user_id: user_id.clone(), index });
    }

    if let Some(index) =
        sessions.windows(2).position(|pair| pair[1].visit_start_time < pair[0].visit_start_time)
    {
        return Err(WindowError::UnsortedSessions { user_id: user_id.clone(), index: index + 1 });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use lookback_primitives::Timestamp;

    use super::*;

    fn hour(n: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::hours(n)
    }

    #[test]
    fn sorted_sessions_pass() {
        let sessions = vec![
            Session::new("a", hour(0), hour(1)),
            Session::new("b", hour(2), hour(3)),
            Session::new("c", hour(2), hour(2)),
        ];
        assert!(validate_sessions(&UserId::new("u"), &sessions).is_ok());
        assert!(validate_sessions(&UserId::new("u"), &[]).is_ok());
    }

    #[test]
    fn unsorted_sessions_report_index() {
        let sessions = vec![
            Session::new("a", hour(0), hour(1)),
            Session::new("b", hour(5), hour(6)),
            Session::new("c", hour(3), hour(4)),
        ];
        let err = validate_sessions(&UserId::new("u"), &sessions).unwrap_err();
        assert!(matches!(err, WindowError::UnsortedSessions { index: 2, .. }));
    }

    #[test]
    fn reversed_session_reports_index() {
        let sessions = vec![Session::new("a", hour(0), hour(1)), Session::new("b", hour(4), hour(3))];
        let err = validate_sessions(&UserId::new("u"), &sessions).unwrap_err();
        assert!(matches!(err, WindowError::InvalidSession { index: 1, .. }));
    }
}
