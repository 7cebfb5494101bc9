//! Window summaries as DataFrames.

use lookback_primitives::LookbackWindow;
use polars::prelude::*;

use crate::UtilsError;

/// Flatten windows into one row per window.
///
/// Instants are written as epoch milliseconds; sessions are reduced to
/// `session_count`.
///
/// # Errors
/// Returns `UtilsError::Polars` if the frame cannot be built.
pub fn windows_to_frame(windows: &[LookbackWindow]) -> Result<DataFrame, UtilsError> {
    let millis = |f: fn(&LookbackWindow) -> i64| windows.iter().map(f).collect::<Vec<_>>();

    let df = df! {
        "user_id" => windows.iter().map(|w| w.user_id.as_str()).collect::<Vec<_>>(),
        "start_time" => millis(|w| w.start_time.timestamp_millis()),
        "end_time" => millis(|w| w.end_time.timestamp_millis()),
        "effective_date" => millis(|w| w.effective_date.timestamp_millis()),
        "first_activity_time" => millis(|w| w.first_activity_time.timestamp_millis()),
        "session_count" => windows.iter().map(|w| w.len() as u32).collect::<Vec<_>>(),
        "prediction_label" => windows.iter().map(|w| w.prediction_label).collect::<Vec<_>>(),
    }?;

    Ok(df)
}

/// Share of positively labeled windows; `0.0` for an empty frame.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if `prediction_label` is absent.
pub fn label_rate(df: &DataFrame) -> Result<f64, UtilsError> {
    let labels = df
        .column("prediction_label")
        .map_err(|_| UtilsError::MissingColumn("prediction_label".to_string()))?
        .bool()?;

    if labels.is_empty() {
        return Ok(0.0);
    }
    let positives = labels.into_iter().filter(|v| *v == Some(true)).count();
    Ok(positives as f64 / labels.len() as f64)
}
