//! Tracing subscriber bootstrap for applications embedding the engine.

use anyhow::Result;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

const FALLBACK_LEVEL: &str = "info";

/// ## Summary
/// Builds the log filter for the configured level.
///
/// ## Errors
/// Returns the parse error if the configured directive is invalid.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(config.level.as_str())
}

/// Configured filter, or the `info` fallback together with the reason.
fn filter_or_fallback(config: &LoggingConfig) -> (EnvFilter, Option<ParseError>) {
    match env_filter(config) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(FALLBACK_LEVEL), Some(err)),
    }
}

/// ## Summary
/// Installs the global tracing subscriber.
///
/// An invalid level falls back to `info`, reported as a warning once the
/// subscriber is installed.
///
/// ## Errors
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let (filter, invalid_level) = filter_or_fallback(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()?;

    if let Some(err) = invalid_level {
        tracing::warn!(
            level = %config.level,
            error = %err,
            "Invalid log level in config, using {FALLBACK_LEVEL}"
        );
    }

    tracing::debug!(level = %config.level, "Tracing initialized");
    Ok(())
}
