//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set. Otherwise the configured level applies to this
//! crate and `warn` to dependencies.
//!
//! # Usage
//!
//! ```rust,ignore
//! use backtest_engine::telemetry::init_tracing;
//!
//! init_tracing(&config.observability.logging);
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the filter for `config`.
///
/// An unparseable level falls back to `info`.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.level.trim().to_ascii_lowercase();
        EnvFilter::try_new(format!("warn,backtest_engine={level}"))
            .unwrap_or_else(|_| EnvFilter::new("warn,backtest_engine=info"))
    })
}

/// Install the global tracing subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = env_filter(config);

    let result = if config.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
