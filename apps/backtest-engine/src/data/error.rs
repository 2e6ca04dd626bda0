//! Price-fetch error types.

use thiserror::Error;

use crate::error::BacktestError;

/// Errors from fetching or decoding daily prices.
#[derive(Debug, Error)]
pub enum DataError {
    /// Symbol is empty, too long or has characters outside `[A-Z0-9.-]`.
    #[error("Invalid symbol '{0}'")]
    InvalidSymbol(String),

    /// No API key configured.
    #[error("Alpha Vantage API key is not set")]
    MissingApiKey,

    /// Request could not be sent or the body could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body, possibly truncated.
        message: String,
    },

    /// Body is not the expected JSON.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// API reported an error, typically an unknown symbol.
    #[error("API error: {0}")]
    Api(String),

    /// API returned a throttling notice instead of data.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Response has no daily series.
    #[error("Invalid or unavailable ticker: {symbol}")]
    MissingSeries {
        /// Requested symbol.
        symbol: String,
    },

    /// Daily series is present but empty.
    #[error("No data available for ticker: {symbol}")]
    EmptySeries {
        /// Requested symbol.
        symbol: String,
    },

    /// A bar could not be decoded.
    #[error("Invalid bar for {date}: {message}")]
    InvalidBar {
        /// Date key of the bar.
        date: String,
        /// What was wrong.
        message: String,
    },

    /// Decoded bars do not form a valid price series.
    #[error(transparent)]
    InvalidSeries(#[from] BacktestError),

    /// Saved payload could not be read.
    #[error("Failed to read price file '{path}': {source}")]
    ReadError {
        /// Path to the file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

impl DataError {
    /// Whether retrying the same symbol later could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::RateLimited(_) | Self::Http { status: 500..=599 | 429, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_series_message() {
        let err = DataError::MissingSeries {
            symbol: "ZZZZ".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid or unavailable ticker: ZZZZ");
    }

    #[test]
    fn test_transient_classification() {
        assert!(DataError::RateLimited("slow down".to_string()).is_transient());
        assert!(
            DataError::Http {
                status: 503,
                message: String::new()
            }
            .is_transient()
        );
        assert!(!DataError::Api("bad symbol".to_string()).is_transient());
        assert!(
            !DataError::Http {
                status: 404,
                message: String::new()
            }
            .is_transient()
        );
    }
}
