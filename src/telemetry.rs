//! Tracing subscriber setup for binaries and demos embedding the gate.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the process that owns `main`.

use thiserror::Error;
use tracing_subscriber::filter::EnvFilter;

const LOG_ENV: &str = "SWAPGATE_LOG";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Global tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Pick the log filter.
///
/// `SWAPGATE_LOG` wins, then `RUST_LOG`, then `default_directive`. An
/// unparsable directive falls back to the next source.
pub fn filter_from_env(default_directive: &str) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}

/// Install a global fmt subscriber filtered by [`filter_from_env`].
pub fn init_tracing(default_directive: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env(default_directive))
        .with_target(false)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_already_installed() {
        let _ = init_tracing("warn");
        assert!(matches!(
            init_tracing("warn"),
            Err(TelemetryError::AlreadyInstalled(_))
        ));
    }
}
