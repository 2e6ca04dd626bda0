//! Price data source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::OutputSize;

/// Where daily prices come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Alpha Vantage API key.
    #[serde(default)]
    pub api_key: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// History length requested per symbol.
    #[serde(default)]
    pub output_size: OutputSize,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Symbols to backtest.
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Saved `TIME_SERIES_DAILY` payload used instead of the API.
    #[serde(default)]
    pub prices_file: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            output_size: OutputSize::default(),
            timeout_secs: default_timeout_secs(),
            symbols: Vec::new(),
            prices_file: None,
        }
    }
}

impl DataConfig {
    /// Whether prices will be fetched over HTTP.
    #[must_use]
    pub const fn uses_api(&self) -> bool {
        self.prices_file.is_none()
    }
}

fn default_base_url() -> String {
    "https://www.alphavantage.co".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}
