//! Configuration module for the backtest engine.
//!
//! Provides YAML configuration loading, validation, and environment
//! variable interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use backtest_engine::config::{EnvOverrides, load_config_with_overrides};
//!
//! // Missing file falls back to defaults; env overrides are applied before validation
//! let config = load_config_with_overrides(Some("config.yaml"), &EnvOverrides::from_env())?;
//!
//! println!("strategies: {:?}", config.backtest.strategies);
//! ```

mod backtest;
mod data;
mod observability;
mod report;
mod validation;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use backtest::BacktestSettings;
pub use data::DataConfig;
pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use report::ReportConfig;
pub use validation::ValidationConfig;

pub use crate::backtest::parallel::ParallelConfig;
use crate::backtest::signals::SignalGenerator;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "BACKTEST_CONFIG";

/// Environment variable overriding `data.symbols` (comma separated).
pub const SYMBOLS_ENV: &str = "BACKTEST_SYMBOLS";

/// Environment variable filling an empty `data.api_key`.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Price data source.
    #[serde(default)]
    pub data: DataConfig,
    /// Strategies and annualization.
    #[serde(default)]
    pub backtest: BacktestSettings,
    /// Parallel execution.
    #[serde(default)]
    pub parallel: ParallelConfig,
    /// Pre-run checks.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Report output.
    #[serde(default)]
    pub report: ReportConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Values taken from the process environment after the file is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Comma-separated symbols replacing `data.symbols`.
    pub symbols: Option<String>,
    /// API key used when `data.api_key` is empty.
    pub api_key: Option<String>,
}

impl EnvOverrides {
    /// Read [`SYMBOLS_ENV`] and [`API_KEY_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            symbols: non_empty(SYMBOLS_ENV),
            api_key: non_empty(API_KEY_ENV),
        }
    }
}

impl Config {
    /// Apply environment overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &EnvOverrides) -> Self {
        if let Some(symbols) = &overrides.symbols {
            self.data.symbols = symbols
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(key) = &overrides.api_key {
            if self.data.api_key.trim().is_empty() {
                self.data.api_key.clone_from(key);
            }
        }
        self
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let config = parse_config(&read_config_file(path.unwrap_or(DEFAULT_CONFIG_PATH))?)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let config = parse_config(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration, apply `overrides`, then validate.
///
/// A missing file yields the default configuration rather than an error.
///
/// # Errors
///
/// Returns a `ConfigError` if an existing file cannot be read or parsed, or
/// the overridden configuration is invalid.
pub fn load_config_with_overrides(
    path: Option<&str>,
    overrides: &EnvOverrides,
) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let config = if Path::new(path).exists() {
        parse_config(&read_config_file(path)?)?
    } else {
        tracing::debug!(path, "Config file not found, using defaults");
        Config::default()
    };

    let config = config.with_overrides(overrides);
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate and parse without validating.
///
/// An empty document yields the default configuration.
///
/// # Errors
///
/// Returns `ParseError` if the YAML is malformed.
pub fn parse_config(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    if interpolated.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml_bw::from_str(&interpolated)?)
}

fn read_config_file(path: &str) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ValidationError` naming the first offending field.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.backtest.periods_per_year == 0 {
        return Err(ConfigError::ValidationError(
            "backtest.periods_per_year must be positive".to_string(),
        ));
    }

    if config.backtest.strategies.is_empty() {
        return Err(ConfigError::ValidationError(
            "backtest.strategies must list at least one strategy".to_string(),
        ));
    }

    for strategy in &config.backtest.strategies {
        strategy.validate().map_err(|e| {
            ConfigError::ValidationError(format!("backtest.strategies: {strategy}: {e}"))
        })?;
    }

    if config.data.uses_api() {
        if config.data.symbols.is_empty() {
            return Err(ConfigError::ValidationError(
                "data.symbols must list at least one symbol unless data.prices_file is set"
                    .to_string(),
            ));
        }
        if config.data.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "data.api_key is required to fetch prices (set {API_KEY_ENV})"
            )));
        }
    }

    if config.data.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "data.timeout_secs must be positive".to_string(),
        ));
    }

    let format = config.observability.logging.format.to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}
