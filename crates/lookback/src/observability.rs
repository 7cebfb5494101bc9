//! Logging configuration and initialization.
//!
//! The library crates only emit `tracing` events; binaries decide where they
//! go. Settings come from the environment:
//!
//! - `LOOKBACK_LOG_LEVEL`: an `EnvFilter` directive, default `info`
//! - `LOOKBACK_LOG_FORMAT`: `json` or `pretty`, default `pretty`
//! - `LOOKBACK_LOG_TARGET`: whether to print event targets, default `true`

use std::env;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_LEVEL_VAR: &str = "LOOKBACK_LOG_LEVEL";
/// Environment variable holding the output format.
pub const LOG_FORMAT_VAR: &str = "LOOKBACK_LOG_FORMAT";
/// Environment variable toggling event targets.
pub const LOG_TARGET_VAR: &str = "LOOKBACK_LOG_TARGET";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Whether event targets are printed.
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty, include_target: true }
    }
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingInitError {
    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Read logging settings from the process environment.
///
/// Unset, empty or unparseable values keep their defaults.
#[must_use]
pub fn logging_config_from_env() -> LoggingConfig {
    logging_config_from_lookup(|key| env::var(key).ok())
}

/// Read logging settings through an arbitrary variable lookup.
#[must_use]
pub fn logging_config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if let Some(level) = lookup(LOG_LEVEL_VAR) {
        let trimmed = level.trim();
        if !trimmed.is_empty() {
            config.level = trimmed.to_string();
        }
    }

    if let Some(parsed) = lookup(LOG_FORMAT_VAR).as_deref().and_then(parse_log_format) {
        config.format = parsed;
    }

    if let Some(parsed) = lookup(LOG_TARGET_VAR).as_deref().and_then(parse_bool) {
        config.include_target = parsed;
    }

    config
}

/// Install the global `tracing` subscriber.
///
/// An invalid filter directive falls back to `info`.
///
/// # Errors
/// Returns `LoggingInitError::AlreadyInitialized` if a subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingInitError> {
    let env_filter =
        EnvFilter::try_new(config.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(config.include_target)
        .with_ansi(matches!(config.format, LogFormat::Pretty));

    match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish())?,
    }

    Ok(())
}

/// Log the start of a generation run.
pub fn log_run_start(config: &LoggingConfig, sessions_path: &str, params_path: &str) {
    info!(
        component = "cli",
        event = "app.start",
        log_level = %config.level,
        log_format = ?config.format,
        sessions_path,
        params_path
    );
}

fn parse_log_format(raw: &str) -> Option<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" => Some(LogFormat::Pretty),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_missing() {
        let cfg = logging_config_from_lookup(lookup(&[]));
        assert_eq!(cfg, LoggingConfig::default());
    }

    #[test]
    fn parses_json_and_level_and_target() {
        let cfg = logging_config_from_lookup(lookup(&[
            (LOG_LEVEL_VAR, "lookback_windows=debug"),
            (LOG_FORMAT_VAR, "JSON"),
            (LOG_TARGET_VAR, "off"),
        ]));

        assert_eq!(cfg.level, "lookback_windows=debug");
        assert_eq!(cfg.format, LogFormat::Json);
        assert!(!cfg.include_target);
    }

    #[test]
    fn invalid_format_or_target_falls_back_to_defaults() {
        let cfg = logging_config_from_lookup(lookup(&[
            (LOG_LEVEL_VAR, "  "),
            (LOG_FORMAT_VAR, "yaml"),
            (LOG_TARGET_VAR, "maybe"),
        ]));

        assert_eq!(cfg, LoggingConfig::default());
    }
}
