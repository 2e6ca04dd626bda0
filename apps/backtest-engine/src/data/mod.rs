//! Daily price data.
//!
//! Fetches `TIME_SERIES_DAILY` closes from Alpha Vantage, or reads a saved
//! payload of the same shape from disk, and turns them into a validated
//! [`PriceSeries`](crate::backtest::PriceSeries).

mod alpha_vantage;
mod error;

use std::path::Path;

use crate::backtest::series::PriceSeries;

pub use alpha_vantage::{AlphaVantageClient, OutputSize, parse_daily};
pub use error::DataError;

/// Longest accepted ticker symbol.
pub const MAX_SYMBOL_LEN: usize = 10;

/// Upper-case and validate a ticker symbol.
///
/// # Errors
///
/// Returns `InvalidSymbol` unless the trimmed symbol is 1 to
/// [`MAX_SYMBOL_LEN`] characters of `A-Z`, `0-9`, `.` or `-`.
pub fn normalize_symbol(raw: &str) -> Result<String, DataError> {
    let symbol = raw.trim().to_ascii_uppercase();
    let valid = !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-');

    if valid {
        Ok(symbol)
    } else {
        Err(DataError::InvalidSymbol(raw.to_string()))
    }
}

/// Load a saved `TIME_SERIES_DAILY` JSON payload.
///
/// The file stem is used as the symbol in error messages.
///
/// # Errors
///
/// Returns `ReadError` if the file cannot be read, otherwise the
/// [`parse_daily`] errors.
pub fn load_daily_json(path: impl AsRef<Path>) -> Result<PriceSeries, DataError> {
    let path = path.as_ref();
    let body = std::fs::read_to_string(path).map_err(|source| DataError::ReadError {
        path: path.display().to_string(),
        source,
    })?;
    let symbol = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().to_uppercase());
    parse_daily(&symbol, &body)
}
