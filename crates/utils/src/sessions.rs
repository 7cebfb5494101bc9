//! Session table loading.

use std::collections::BTreeMap;

use chrono::DateTime;
use lookback_primitives::{Session, Timestamp, UserId};
use polars::prelude::*;

use crate::UtilsError;

/// Columns a session table must carry. `positive_label_time` may be absent.
pub const SESSION_COLUMNS: [&str; 4] =
    ["user_id", "session_id", "visit_start_time", "last_hit_time"];

const LABEL_COLUMN: &str = "positive_label_time";

/// Group a session table into per-user session lists.
///
/// Time columns hold epoch milliseconds, either as integers or as datetime
/// columns. Rows are sorted by user and visit start, so every list is ready
/// for window generation.
///
/// # Arguments
/// * `df` - LazyFrame with the columns in [`SESSION_COLUMNS`] and an optional
///   `positive_label_time`
///
/// # Returns
/// Sessions keyed by user, each list ascending by visit start.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if a required column is absent,
/// `UtilsError::NullValue` for nulls in a required column, or
/// `UtilsError::InvalidTimestamp` for out-of-range instants.
pub fn sessions_from_frame(
    mut df: LazyFrame,
) -> Result<BTreeMap<UserId, Vec<Session>>, UtilsError> {
    let schema = df.collect_schema()?;
    if let Some(missing) = SESSION_COLUMNS.iter().find(|c| schema.get(c).is_none()) {
        return Err(UtilsError::MissingColumn((*missing).to_string()));
    }
    let label = if schema.get(LABEL_COLUMN).is_some() {
        epoch_millis(LABEL_COLUMN)
    } else {
        lit(NULL).cast(DataType::Int64).alias(LABEL_COLUMN)
    };

    let sort_options = SortMultipleOptions::new().with_maintain_order(true);
    let df = df
        .select([
            col("user_id").cast(DataType::String),
            col("session_id").cast(DataType::String),
            epoch_millis("visit_start_time"),
            epoch_millis("last_hit_time"),
            label,
        ])
        .sort(["user_id", "visit_start_time"], sort_options)
        .collect()?;

    let users = df.column("user_id")?.str()?;
    let ids = df.column("session_id")?.str()?;
    let starts = df.column("visit_start_time")?.i64()?;
    let last_hits = df.column("last_hit_time")?.i64()?;
    let labels = df.column(LABEL_COLUMN)?.i64()?;

    let mut grouped: BTreeMap<UserId, Vec<Session>> = BTreeMap::new();
    for row in 0..df.height() {
        let user = users.get(row).ok_or(UtilsError::NullValue { column: "user_id", row })?;
        let session_id =
            ids.get(row).ok_or(UtilsError::NullValue { column: "session_id", row })?;
        let start = required_instant(starts, "visit_start_time", row)?;
        let last_hit = required_instant(last_hits, "last_hit_time", row)?;

        let mut session = Session::new(session_id, start, last_hit);
        if let Some(ms) = labels.get(row) {
            session = session.with_positive_label_time(instant(LABEL_COLUMN, ms)?);
        }
        grouped.entry(UserId::new(user)).or_default().push(session);
    }

    Ok(grouped)
}

/// Normalize a time column to epoch milliseconds.
fn epoch_millis(name: &str) -> Expr {
    col(name)
        .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
        .cast(DataType::Int64)
        .alias(name)
}

fn required_instant(
    values: &Int64Chunked,
    column: &'static str,
    row: usize,
) -> Result<Timestamp, UtilsError> {
    let ms = values.get(row).ok_or(UtilsError::NullValue { column, row })?;
    instant(column, ms)
}

fn instant(column: &'static str, ms: i64) -> Result<Timestamp, UtilsError> {
    DateTime::from_timestamp_millis(ms).ok_or(UtilsError::InvalidTimestamp { column, value: ms })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600_000;

    fn table() -> LazyFrame {
        df! {
            "user_id" => &["b", "a", "b", "a"],
            "session_id" => &["b2", "a1", "b1", "a2"],
            "visit_start_time" => &[5 * HOUR, 0, 2 * HOUR, 3 * HOUR],
            "last_hit_time" => &[6 * HOUR, HOUR, 3 * HOUR, 4 * HOUR],
            "positive_label_time" => &[Some(6 * HOUR), None, None, Some(4 * HOUR)],
        }
        .unwrap()
        .lazy()
    }

    #[test]
    fn groups_and_sorts_by_user_and_start() {
        let sessions = sessions_from_frame(table()).unwrap();

        assert_eq!(sessions.len(), 2);
        let a: Vec<_> = sessions[&UserId::new("a")].iter().map(|s| s.session_id.as_str()).collect();
        let b: Vec<_> = sessions[&UserId::new("b")].iter().map(|s| s.session_id.as_str()).collect();
        assert_eq!(a, ["a1", "a2"]);
        assert_eq!(b, ["b1", "b2"]);

        let a2 = &sessions[&UserId::new("a")][1];
        assert_eq!(a2.visit_start_time.timestamp_millis(), 3 * HOUR);
        assert_eq!(a2.last_hit_time.timestamp_millis(), 4 * HOUR);
        assert_eq!(a2.positive_label_time.map(|t| t.timestamp_millis()), Some(4 * HOUR));
        assert_eq!(sessions[&UserId::new("a")][0].positive_label_time, None);
    }

    #[test]
    fn label_column_is_optional() {
        let df = table().drop(["positive_label_time"]);
        let sessions = sessions_from_frame(df).unwrap();
        assert!(sessions.values().flatten().all(|s| s.positive_label_time.is_none()));
    }

    #[test]
    fn missing_required_column_is_reported() {
        let df = table().drop(["last_hit_time"]);
        let err = sessions_from_frame(df).unwrap_err();
        assert!(matches!(err, UtilsError::MissingColumn(ref c) if c == "last_hit_time"));
    }

    #[test]
    fn null_start_is_reported() {
        let df = df! {
            "user_id" => &["a"],
            "session_id" => &["a1"],
            "visit_start_time" => &[None::<i64>],
            "last_hit_time" => &[Some(HOUR)],
        }
        .unwrap()
        .lazy();

        let err = sessions_from_frame(df).unwrap_err();
        assert!(matches!(err, UtilsError::NullValue { column: "visit_start_time", .. }));
    }
}
