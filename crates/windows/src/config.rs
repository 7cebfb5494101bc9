//! Windowing configuration.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use lookback_placement::Placement;
use lookback_primitives::{TimeDelta, Timestamp};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Date formats accepted for bare snapshot dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Resolved configuration shared by every user's walk.
///
/// The slide step is not part of this struct; it belongs to the placement
/// strategy handed to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowingConfig {
    /// Start of the snapshot; the first candidate window has this effective date.
    pub snapshot_start_date: Timestamp,
    /// End of the snapshot; no window has a later effective date.
    pub snapshot_end_date: Timestamp,
    /// Offset from a window's end to its effective date.
    pub lookback_gap: TimeDelta,
    /// Span of every window.
    pub window_duration: TimeDelta,
    /// Exclusive lower bound of the label interval, relative to the effective date.
    pub min_lookahead: TimeDelta,
    /// Inclusive upper bound of the label interval, relative to the effective date.
    pub max_lookahead: TimeDelta,
    /// Stop a user's walk once the first window's label instant precedes the
    /// next candidate's lookahead start.
    pub stop_on_first_positive_label: bool,
}

impl WindowingConfig {
    /// Create a configuration with no lookback gap, a lookahead of
    /// `(0, max_lookahead]` and early stopping disabled.
    #[must_use]
    pub const fn new(
        snapshot_start_date: Timestamp,
        snapshot_end_date: Timestamp,
        window_duration: TimeDelta,
        max_lookahead: TimeDelta,
    ) -> Self {
        Self {
            snapshot_start_date,
            snapshot_end_date,
            lookback_gap: TimeDelta::zero(),
            window_duration,
            min_lookahead: TimeDelta::zero(),
            max_lookahead,
            stop_on_first_positive_label: false,
        }
    }

    /// Set the lookback gap.
    #[must_use]
    pub const fn with_lookback_gap(mut self, gap: TimeDelta) -> Self {
        self.lookback_gap = gap;
        self
    }

    /// Set both lookahead bounds.
    #[must_use]
    pub const fn with_lookahead(mut self, min: TimeDelta, max: TimeDelta) -> Self {
        self.min_lookahead = min;
        self.max_lookahead = max;
        self
    }

    /// Enable or disable early stopping on the first positive label.
    #[must_use]
    pub const fn with_stop_on_first_positive_label(mut self, stop: bool) -> Self {
        self.stop_on_first_positive_label = stop;
        self
    }

    /// Start of the first candidate window.
    ///
    /// Only meaningful on a validated configuration.
    #[must_use]
    pub fn first_window_start(&self) -> Timestamp {
        self.snapshot_start_date - self.lookback_gap - self.window_duration
    }

    /// Check every constraint the walk relies on.
    ///
    /// # Errors
    /// Returns `ConfigError` if the window is not positive, the snapshot range
    /// is empty, the lookahead bounds are inverted, or derived instants
    /// overflow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_duration <= TimeDelta::zero() {
            return Err(ConfigError::NonPositiveWindow(self.window_duration));
        }
        if self.snapshot_start_date >= self.snapshot_end_date {
            return Err(ConfigError::InvalidSnapshotRange {
                start: self.snapshot_start_date,
                end: self.snapshot_end_date,
            });
        }
        if self.min_lookahead > self.max_lookahead {
            return Err(ConfigError::InvalidLookahead {
                min: self.min_lookahead,
                max: self.max_lookahead,
            });
        }

        self.snapshot_start_date
            .checked_sub_signed(self.lookback_gap)
            .and_then(|t| t.checked_sub_signed(self.window_duration))
            .ok_or(ConfigError::TimeOverflow("first window start"))?;
        self.snapshot_start_date
            .checked_add_signed(self.min_lookahead)
            .ok_or(ConfigError::TimeOverflow("minimum lookahead"))?;
        self.snapshot_end_date
            .checked_add_signed(self.max_lookahead)
            .ok_or(ConfigError::TimeOverflow("maximum lookahead"))?;

        Ok(())
    }
}

/// Raw windowing parameters as supplied to a job.
///
/// Dates are strings and durations whole seconds; [`WindowingParams::resolve`]
/// turns them into a validated [`WindowingConfig`] and a [`Placement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowingParams {
    /// Snapshot start: RFC 3339 instant, or a date resolving to its midnight.
    pub snapshot_start_date: String,
    /// Snapshot end: RFC 3339 instant, or a date resolving to the midnight
    /// that ends it.
    pub snapshot_end_date: String,
    /// Lookback gap in seconds.
    #[serde(default)]
    pub lookback_gap_seconds: i64,
    /// Window duration in seconds.
    pub window_seconds: i64,
    /// Slide in seconds; absent selects fixed placement.
    #[serde(default)]
    pub slide_seconds: Option<i64>,
    /// Minimum lookahead in seconds.
    #[serde(default)]
    pub min_lookahead_seconds: i64,
    /// Maximum lookahead in seconds.
    pub max_lookahead_seconds: i64,
    /// Early stopping on the first positive label.
    #[serde(default)]
    pub stop_on_first_positive_label: bool,
}

impl WindowingParams {
    /// Resolve into a validated configuration and placement.
    ///
    /// # Errors
    /// Returns `ConfigError` if a date does not parse, a duration is out of
    /// range, the slide is not positive, or the resolved configuration is
    /// invalid.
    pub fn resolve(&self) -> Result<(WindowingConfig, Placement), ConfigError> {
        let config = WindowingConfig {
            snapshot_start_date: parse_date("snapshot_start_date", &self.snapshot_start_date, false)?,
            snapshot_end_date: parse_date("snapshot_end_date", &self.snapshot_end_date, true)?,
            lookback_gap: seconds("lookback_gap_seconds", self.lookback_gap_seconds)?,
            window_duration: seconds("window_seconds", self.window_seconds)?,
            min_lookahead: seconds("min_lookahead_seconds", self.min_lookahead_seconds)?,
            max_lookahead: seconds("max_lookahead_seconds", self.max_lookahead_seconds)?,
            stop_on_first_positive_label: self.stop_on_first_positive_label,
        };
        config.validate()?;

        let slide = self.slide_seconds.map(|s| seconds("slide_seconds", s)).transpose()?;
        let placement = Placement::from_slide(slide)?;

        Ok((config, placement))
    }
}

fn seconds(field: &'static str, seconds: i64) -> Result<TimeDelta, ConfigError> {
    TimeDelta::try_seconds(seconds).ok_or(ConfigError::DurationOutOfRange { field, seconds })
}

/// Parse a snapshot bound.
///
/// Bare end dates are inclusive, so they resolve to the following midnight.
fn parse_date(field: &'static str, raw: &str, end_of_day: bool) -> Result<Timestamp, ConfigError> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    let invalid = || ConfigError::InvalidDate { field, value: raw.to_string() };
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(invalid)?;
    let date = if end_of_day { date.succ_opt().ok_or_else(invalid)? } else { date };

    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
