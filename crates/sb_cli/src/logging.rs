//! Subscriber setup for the binary. Libraries only emit `tracing` events.

use std::fmt;
use std::io;

use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "SCOREBOARD_LOG";
const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug)]
pub enum LoggingError {
    InvalidFilter(String),
    Init(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidFilter(m) => write!(f, "invalid log filter: {m}"),
            LoggingError::Init(m) => write!(f, "logging init: {m}"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// `--quiet` wins; then `SCOREBOARD_LOG`, then `RUST_LOG`, then `warn`.
pub fn filter_directive(quiet: bool) -> String {
    if quiet {
        return "error".to_string();
    }
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Install a stderr text subscriber. stdout stays reserved for `--print`.
pub fn init(quiet: bool) -> Result<(), LoggingError> {
    let directive = filter_directive(quiet);
    let filter = EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    let layer = tfmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_forces_error_level() {
        assert_eq!(filter_directive(true), "error");
    }
}
