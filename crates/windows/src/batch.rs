//! Parallel window generation across users.
//!
//! Every user's walk is independent, so users are fanned out over a rayon
//! thread pool. Each worker borrows the shared, immutable generator and the
//! user's session slice; no walk state crosses users.
//!
//! Results are kept in ascending user-key order, so a batch run produces the
//! same output regardless of thread count.

use std::time::{Duration, Instant};

use lookback_primitives::{LookbackWindow, UserId};
use lookback_traits::{SessionSource, SinkError, WindowPlacement, WindowSink};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::{WindowError, WindowGenerator};

/// Error handling mode for batch processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the batch on the first failing user (default).
    #[default]
    FailFast,

    /// Record failing users and keep processing the rest.
    CollectErrors,
}

/// Configuration for batch processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// How per-user failures are handled.
    pub error_mode: ErrorMode,
}

impl BatchConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self { threads: None, error_mode: ErrorMode::FailFast }
    }

    /// Set the number of worker threads.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Set the error handling mode.
    #[must_use]
    pub const fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Number of threads that will actually be used.
    #[must_use]
    pub fn threads_used(&self) -> usize {
        self.threads.unwrap_or_else(rayon::current_num_threads).max(1)
    }
}

/// All windows produced for one user, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWindows {
    /// The user.
    pub user_id: UserId,
    /// The user's windows.
    pub windows: Vec<LookbackWindow>,
}

/// A user whose walk failed.
#[derive(Debug)]
pub struct UserFailure {
    /// The user.
    pub user_id: UserId,
    /// Why the walk failed.
    pub error: WindowError,
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchOutput {
    /// Successful users in ascending key order.
    pub users: Vec<UserWindows>,
    /// Failed users in ascending key order.
    pub failures: Vec<UserFailure>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl BatchOutput {
    /// Number of users processed successfully.
    #[must_use]
    pub const fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of failed users.
    #[must_use]
    pub const fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether every user succeeded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total windows across users.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.users.iter().map(|u| u.windows.len()).sum()
    }

    /// Total positively labeled windows across users.
    #[must_use]
    pub fn positive_count(&self) -> usize {
        self.users.iter().flat_map(|u| &u.windows).filter(|w| w.prediction_label).count()
    }

    /// Deliver every window to a sink, user by user.
    ///
    /// # Returns
    /// Number of windows delivered.
    ///
    /// # Errors
    /// Returns the first `SinkError` raised by the sink.
    pub fn drain_into<S: WindowSink + ?Sized>(self, sink: &mut S) -> Result<usize, SinkError> {
        let mut delivered = 0;
        for user in self.users {
            for window in user.windows {
                sink.accept(window)?;
                delivered += 1;
            }
        }
        sink.flush()?;
        Ok(delivered)
    }

    /// Flatten into a single window list, user by user.
    #[must_use]
    pub fn into_windows(self) -> Vec<LookbackWindow> {
        self.users.into_iter().flat_map(|u| u.windows).collect()
    }
}

/// Runs one generator over every user of a session source.
#[derive(Debug, Clone)]
pub struct BatchProcessor<P> {
    generator: WindowGenerator<P>,
    config: BatchConfig,
}

impl<P: WindowPlacement> BatchProcessor<P> {
    /// Create a batch processor.
    #[must_use]
    pub const fn new(generator: WindowGenerator<P>, config: BatchConfig) -> Self {
        Self { generator, config }
    }

    /// Get the generator.
    #[must_use]
    pub const fn generator(&self) -> &WindowGenerator<P> {
        &self.generator
    }

    /// Get the batch configuration.
    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Generate windows for every user of `source`.
    ///
    /// Users unknown to the source yield no windows.
    ///
    /// # Errors
    /// Returns `WindowError::ThreadPool` if the worker pool cannot be built,
    /// or, in `ErrorMode::FailFast`, the error of a failing user.
    pub fn process<S: SessionSource + ?Sized>(&self, source: &S) -> Result<BatchOutput, WindowError> {
        let started = Instant::now();
        let user_ids = source.user_ids();
        let threads = self.config.threads_used();

        info!(
            component = "batch",
            event = "batch.start",
            users = user_ids.len(),
            threads,
            placement = self.generator.placement().name(),
            error_mode = ?self.config.error_mode
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| WindowError::ThreadPool(e.to_string()))?;

        let outcomes: Vec<(UserId, Result<Vec<LookbackWindow>, WindowError>)> = pool.install(|| {
            user_ids
                .into_par_iter()
                .map(|user_id| {
                    let sessions = source.sessions(&user_id).unwrap_or_default();
                    let result = self.generator.generate(&user_id, sessions);
                    (user_id, result)
                })
                .collect()
        });

        let mut output = BatchOutput::default();
        for (user_id, result) in outcomes {
            match result {
                Ok(windows) => output.users.push(UserWindows { user_id, windows }),
                Err(error) => {
                    warn!(
                        component = "batch",
                        event = "batch.user_failed",
                        user_id = %user_id,
                        error = %error
                    );
                    if self.config.error_mode == ErrorMode::FailFast {
                        return Err(error);
                    }
                    output.failures.push(UserFailure { user_id, error });
                }
            }
        }
        output.elapsed = started.elapsed();

        info!(
            component = "batch",
            event = "batch.finish",
            users = output.user_count(),
            failures = output.failure_count(),
            windows = output.window_count(),
            positives = output.positive_count(),
            elapsed_ms = output.elapsed.as_millis() as u64
        );

        Ok(output)
    }
}
