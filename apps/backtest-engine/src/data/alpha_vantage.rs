//! Alpha Vantage `TIME_SERIES_DAILY` client.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::DataError;
use super::normalize_symbol;
use crate::backtest::series::{PricePoint, PriceSeries};

/// Longest response body echoed into an error.
const MAX_ERROR_BODY: usize = 512;

/// How much history to request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    /// Latest 100 sessions.
    #[default]
    Compact,
    /// Full available history.
    Full,
}

impl OutputSize {
    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown output size '{other}', expected compact or full")),
        }
    }
}

// ============================================
// Response Types
// ============================================

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// Decode a `TIME_SERIES_DAILY` payload into a chronological price series.
///
/// # Errors
///
/// Maps API error and throttling payloads, a missing or empty series, and
/// undecodable bars to the matching [`DataError`].
pub fn parse_daily(symbol: &str, body: &str) -> Result<PriceSeries, DataError> {
    let response: DailyResponse =
        serde_json::from_str(body).map_err(|e| DataError::JsonParse(e.to_string()))?;

    if let Some(message) = response.error_message {
        return Err(DataError::Api(message));
    }

    let Some(series) = response.series else {
        if let Some(notice) = response.note.or(response.information) {
            return Err(DataError::RateLimited(notice));
        }
        return Err(DataError::MissingSeries {
            symbol: symbol.to_string(),
        });
    };

    if series.is_empty() {
        return Err(DataError::EmptySeries {
            symbol: symbol.to_string(),
        });
    }

    let points = series
        .into_iter()
        .map(|(date, bar)| {
            let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                DataError::InvalidBar {
                    date: date.clone(),
                    message: e.to_string(),
                }
            })?;
            let close = bar.close.trim().parse::<f64>().map_err(|e| DataError::InvalidBar {
                date: date.clone(),
                message: format!("close '{}': {e}", bar.close),
            })?;
            Ok::<_, DataError>(PricePoint::new(day, close))
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(PriceSeries::from_unsorted(points)?)
}

// ============================================
// Client
// ============================================

/// HTTP client for daily Alpha Vantage prices.
///
/// Failures are reported to the caller; nothing is retried.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
    output_size: OutputSize,
}

impl AlphaVantageClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` for an empty key and `Network` if the HTTP
    /// client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        output_size: OutputSize,
        timeout: Duration,
    ) -> Result<Self, DataError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DataError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            output_size,
        })
    }

    /// Create a client from the `data` configuration section.
    ///
    /// # Errors
    ///
    /// See [`AlphaVantageClient::new`].
    pub fn from_config(config: &crate::config::DataConfig) -> Result<Self, DataError> {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.output_size,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Configured history length.
    #[must_use]
    pub const fn output_size(&self) -> OutputSize {
        self.output_size
    }

    /// Fetch daily closes for `symbol`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSymbol` before any request is made, `Network`/`Http`
    /// for transport failures, and the [`parse_daily`] errors for the body.
    pub async fn fetch_daily(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let symbol = normalize_symbol(symbol)?;
        let url = format!("{}/query", self.base_url);

        debug!(%symbol, output_size = %self.output_size, "Requesting daily series");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol.as_str()),
                ("outputsize", self.output_size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let prices = parse_daily(&symbol, &body)?;

        info!(
            %symbol,
            observations = prices.len(),
            first = ?prices.first_date(),
            last = ?prices.last_date(),
            "Fetched daily series"
        );

        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "Meta Data": {"2. Symbol": "IBM"},
        "Time Series (Daily)": {
            "2024-01-03": {"1. open": "160.00", "4. close": "161.50", "5. volume": "100"},
            "2024-01-02": {"1. open": "158.00", "4. close": "159.25", "5. volume": "100"},
            "2024-01-04": {"1. open": "161.00", "4. close": "160.10", "5. volume": "100"}
        }
    }"#;

    #[test]
    fn test_parse_daily_sorts_chronologically() {
        let prices = match parse_daily("IBM", PAYLOAD) {
            Ok(p) => p,
            Err(e) => panic!("payload should parse: {e}"),
        };
        assert_eq!(prices.closes(), vec![159.25, 161.5, 160.1]);
        assert_eq!(prices.first_date(), NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn test_parse_daily_error_message() {
        let body = r#"{"Error Message": "Invalid API call."}"#;
        assert!(matches!(parse_daily("NOPE", body), Err(DataError::Api(_))));
    }

    #[test]
    fn test_parse_daily_rate_limit_notices() {
        let note = r#"{"Note": "Thank you for using Alpha Vantage!"}"#;
        let info = r#"{"Information": "Our standard API rate limit is 25 requests per day."}"#;
        assert!(matches!(parse_daily("IBM", note), Err(DataError::RateLimited(_))));
        assert!(matches!(parse_daily("IBM", info), Err(DataError::RateLimited(_))));
    }

    #[test]
    fn test_parse_daily_missing_and_empty_series() {
        assert!(matches!(
            parse_daily("IBM", "{}"),
            Err(DataError::MissingSeries { .. })
        ));
        assert!(matches!(
            parse_daily("IBM", r#"{"Time Series (Daily)": {}}"#),
            Err(DataError::EmptySeries { .. })
        ));
    }

    #[test]
    fn test_parse_daily_rejects_bad_close() {
        let body = r#"{"Time Series (Daily)": {"2024-01-02": {"4. close": "n/a"}}}"#;
        let Err(DataError::InvalidBar { date, .. }) = parse_daily("IBM", body) else {
            panic!("bad close must be rejected");
        };
        assert_eq!(date, "2024-01-02");
    }

    #[test]
    fn test_parse_daily_rejects_non_positive_close() {
        let body = r#"{"Time Series (Daily)": {"2024-01-02": {"4. close": "0.0"}}}"#;
        assert!(matches!(
            parse_daily("IBM", body),
            Err(DataError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_output_size_parsing() {
        assert_eq!("FULL".parse::<OutputSize>(), Ok(OutputSize::Full));
        assert_eq!("compact".parse::<OutputSize>(), Ok(OutputSize::Compact));
        assert!("weekly".parse::<OutputSize>().is_err());
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = AlphaVantageClient::new(
            "  ",
            "https://www.alphavantage.co",
            OutputSize::Compact,
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(DataError::MissingApiKey)));
    }
}
