//! Session source trait definitions.

use std::collections::BTreeMap;

use lookback_primitives::{Session, UserId};

/// Provider of per-user session lists.
///
/// Each list must be complete for its user and sorted ascending by
/// `visit_start_time`. Consumers validate the ordering and report violations
/// per user; sources are not expected to repair them.
pub trait SessionSource: Send + Sync {
    /// Returns every user key, in ascending order.
    fn user_ids(&self) -> Vec<UserId>;

    /// Returns the sessions of one user, or `None` for an unknown key.
    fn sessions(&self, user_id: &UserId) -> Option<&[Session]>;

    /// Returns the number of users.
    fn user_count(&self) -> usize {
        self.user_ids().len()
    }
}

impl SessionSource for BTreeMap<UserId, Vec<Session>> {
    fn user_ids(&self) -> Vec<UserId> {
        self.keys().cloned().collect()
    }

    fn sessions(&self, user_id: &UserId) -> Option<&[Session]> {
        self.get(user_id).map(Vec::as_slice)
    }

    fn user_count(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn btree_map_source_lists_users_in_order() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut source = BTreeMap::new();
        source.insert(UserId::new("b"), vec![Session::new("s2", t, t)]);
        source.insert(UserId::new("a"), vec![Session::new("s1", t, t)]);

        assert_eq!(source.user_ids(), vec![UserId::new("a"), UserId::new("b")]);
        assert_eq!(SessionSource::user_count(&source), 2);
        assert_eq!(source.sessions(&UserId::new("a")).map(<[Session]>::len), Some(1));
        assert!(source.sessions(&UserId::new("missing")).is_none());
    }
}
