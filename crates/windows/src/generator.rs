//! Lookback window generation for a single user.

use std::iter::FusedIterator;

use lookback_labels::LabelTimes;
use lookback_placement::{FixedPlacement, Placement, SlidingPlacement};
use lookback_primitives::{LookbackWindow, Session, TimeDelta, Timestamp, UserId};
use lookback_traits::{WindowPlacement, WindowSink};
use tracing::{debug, trace};

use crate::{ConfigError, WindowError, WindowingConfig, validate_sessions};

/// Where a user's walk currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// Positioning the session pointer for a candidate.
    Scanning,
    /// The last candidate was passed over without emitting.
    Skipping,
    /// The last candidate produced a window.
    Emitting,
    /// The walk is over; no further windows follow.
    Stopped,
}

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The next candidate's effective date lies after the snapshot end.
    SnapshotExhausted,
    /// Every session starts before the next candidate.
    SessionsExhausted,
    /// The placement produced no further candidate.
    PlacementExhausted,
    /// The first recorded label instant precedes the next candidate's lookahead.
    PositiveLabel,
}

/// The first window's label instant, recorded once per walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FirstLabel {
    #[default]
    Unset,
    Recorded(Option<Timestamp>),
}

impl FirstLabel {
    const fn instant(self) -> Option<Timestamp> {
        match self {
            Self::Unset => None,
            Self::Recorded(instant) => instant,
        }
    }
}

/// Generates labeled lookback windows from one user's sessions.
///
/// The generator is immutable and holds no per-user state, so one instance
/// can serve any number of users, concurrently.
#[derive(Debug, Clone)]
pub struct WindowGenerator<P = Placement> {
    config: WindowingConfig,
    placement: P,
}

impl WindowGenerator<FixedPlacement> {
    /// Generator considering a single window whose effective date is the
    /// snapshot start.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn fixed(config: WindowingConfig) -> Result<Self, ConfigError> {
        Self::new(config, FixedPlacement::new())
    }
}

impl WindowGenerator<SlidingPlacement> {
    /// Generator whose candidate windows advance by `slide`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid or `slide` is not
    /// positive.
    pub fn sliding(config: WindowingConfig, slide: TimeDelta) -> Result<Self, ConfigError> {
        Self::new(config, SlidingPlacement::new(slide)?)
    }
}

impl<P: WindowPlacement> WindowGenerator<P> {
    /// Create a generator, validating the configuration up front.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: WindowingConfig, placement: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, placement })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &WindowingConfig {
        &self.config
    }

    /// Get the placement strategy.
    #[must_use]
    pub const fn placement(&self) -> &P {
        &self.placement
    }

    /// Lazily walk one user's sessions.
    ///
    /// Sessions are validated and label instants collected before the first
    /// window is produced.
    ///
    /// # Errors
    /// Returns `WindowError` if the sessions are unsorted or malformed.
    pub fn windows<'a>(
        &'a self,
        user_id: &UserId,
        sessions: &'a [Session],
    ) -> Result<Windows<'a, P>, WindowError> {
        validate_sessions(user_id, sessions)?;
        let labels = LabelTimes::collect(
            sessions,
            self.config.snapshot_start_date,
            self.config.snapshot_end_date,
        )?;

        let (next_start, state, stop_reason) = if sessions.is_empty() {
            (None, WalkState::Stopped, Some(StopReason::SessionsExhausted))
        } else {
            (Some(self.config.first_window_start()), WalkState::Scanning, None)
        };

        Ok(Windows {
            config: &self.config,
            placement: &self.placement,
            user_id: user_id.clone(),
            sessions,
            labels,
            next_start,
            idx: 0,
            first_label: FirstLabel::Unset,
            state,
            stop_reason,
        })
    }

    /// Generate every window for one user.
    ///
    /// # Arguments
    /// * `user_id` - Key copied into every window
    /// * `sessions` - The user's sessions, sorted ascending by visit start
    ///
    /// # Returns
    /// Windows in strictly ascending start order.
    ///
    /// # Errors
    /// Returns `WindowError` if the sessions are unsorted or malformed.
    pub fn generate(
        &self,
        user_id: &UserId,
        sessions: &[Session],
    ) -> Result<Vec<LookbackWindow>, WindowError> {
        let mut walk = self.windows(user_id, sessions)?;
        let windows: Vec<LookbackWindow> = walk.by_ref().collect();

        debug!(
            component = "windows",
            event = "walk.finish",
            user_id = %user_id,
            placement = self.placement.name(),
            sessions = sessions.len(),
            windows = windows.len(),
            stop_reason = ?walk.stop_reason()
        );

        Ok(windows)
    }

    /// Generate one user's windows straight into a sink.
    ///
    /// # Returns
    /// Number of windows delivered.
    ///
    /// # Errors
    /// Returns `WindowError` if the sessions are invalid or the sink refuses a
    /// window.
    pub fn generate_into<S: WindowSink + ?Sized>(
        &self,
        user_id: &UserId,
        sessions: &[Session],
        sink: &mut S,
    ) -> Result<usize, WindowError> {
        let mut delivered = 0;
        for window in self.windows(user_id, sessions)? {
            sink.accept(window)?;
            delivered += 1;
        }
        Ok(delivered)
    }
}

/// Lazy walk over one user's candidate windows.
#[derive(Debug)]
pub struct Windows<'a, P> {
    config: &'a WindowingConfig,
    placement: &'a P,
    user_id: UserId,
    sessions: &'a [Session],
    labels: LabelTimes,
    next_start: Option<Timestamp>,
    /// Index of the first session not starting before the current candidate.
    idx: usize,
    first_label: FirstLabel,
    state: WalkState,
    stop_reason: Option<StopReason>,
}

impl<P: WindowPlacement> Windows<'_, P> {
    /// Current walk state.
    #[must_use]
    pub const fn state(&self) -> WalkState {
        self.state
    }

    /// Why the walk stopped, once it has.
    #[must_use]
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// The user's positive label instants within the snapshot.
    #[must_use]
    pub const fn label_times(&self) -> &LabelTimes {
        &self.labels
    }

    fn stop(&mut self, reason: StopReason) {
        self.next_start = None;
        self.state = WalkState::Stopped;
        self.stop_reason = Some(reason);
    }

    fn contained_sessions(&self, start: Timestamp, end: Timestamp) -> Vec<Session> {
        self.sessions[self.idx..]
            .iter()
            .take_while(|s| s.visit_start_time <= end)
            .filter(|s| s.is_contained_in(start, end))
            .cloned()
            .collect()
    }

    fn emit(
        &mut self,
        start: Timestamp,
        effective_date: Timestamp,
        sessions: Vec<Session>,
    ) -> LookbackWindow {
        let config = self.config;
        let label = self.labels.first_in(
            effective_date + config.min_lookahead,
            effective_date + config.max_lookahead,
        );
        if self.first_label == FirstLabel::Unset {
            self.first_label = FirstLabel::Recorded(label);
        }

        let mut window = LookbackWindow::new(
            self.user_id.clone(),
            start,
            config.window_duration,
            config.lookback_gap,
            self.sessions[0].visit_start_time,
        );
        window.sessions = sessions;
        window.prediction_label = label.is_some();
        window
    }
}

impl<P: WindowPlacement> Iterator for Windows<'_, P> {
    type Item = LookbackWindow;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(window_start) = self.next_start {
            self.state = WalkState::Scanning;
            let config = self.config;

            let bounds = window_start.checked_add_signed(config.window_duration).and_then(|end| {
                end.checked_add_signed(config.lookback_gap).map(|effective| (end, effective))
            });
            let Some((window_end, effective_date)) = bounds else {
                self.stop(StopReason::SnapshotExhausted);
                break;
            };
            if effective_date > config.snapshot_end_date {
                self.stop(StopReason::SnapshotExhausted);
                break;
            }

            if config.stop_on_first_positive_label
                && let Some(label) = self.first_label.instant()
                && label < effective_date + config.min_lookahead
            {
                trace!(
                    component = "windows",
                    event = "walk.early_stop",
                    user_id = %self.user_id,
                    label = %label,
                    effective_date = %effective_date
                );
                self.stop(StopReason::PositiveLabel);
                break;
            }

            while self.idx < self.sessions.len()
                && self.sessions[self.idx].visit_start_time < window_start
            {
                self.idx += 1;
            }
            if self.idx >= self.sessions.len() {
                self.stop(StopReason::SessionsExhausted);
                break;
            }

            self.next_start = self.placement.next_start(window_start);

            // The first session spills past this window's end, so the window
            // precedes the user's recorded activity.
            if self.idx == 0 && self.sessions[0].last_hit_time > window_end {
                self.state = WalkState::Skipping;
                continue;
            }

            let sessions = self.contained_sessions(window_start, window_end);
            if sessions.is_empty() {
                self.state = WalkState::Skipping;
                continue;
            }

            self.state = WalkState::Emitting;
            return Some(self.emit(window_start, effective_date, sessions));
        }

        if self.stop_reason.is_none() {
            self.stop(StopReason::PlacementExhausted);
        }
        None
    }
}

impl<P: WindowPlacement> FusedIterator for Windows<'_, P> {}
