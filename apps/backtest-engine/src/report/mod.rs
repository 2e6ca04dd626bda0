//! Rendering of backtest results.
//!
//! A console summary table, a per-day CSV per job, and JSON documents for
//! the full run or a single job. Charts are out of scope.

mod csv;
mod json;
mod table;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::backtest::runner::BacktestOutcome;
use crate::backtest::series::PriceSeries;
use crate::backtest::signals::StrategyConfig;

pub use csv::daily_csv;
pub use json::{outcome_json, results_json};
pub use table::render_table;

/// Console summary format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Fixed-width text table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Errors writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File or directory could not be written.
    #[error("Failed to write '{path}': {source}")]
    Io {
        /// Target path.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-name stem for a job, e.g. `NVDA_ma_crossover_5_20`.
#[must_use]
pub fn file_stem(symbol: &str, strategy: &StrategyConfig) -> String {
    let slug: String = strategy
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{symbol}_{}", slug.trim_matches('_'))
}

/// Write the per-day CSV and JSON report of one job into `dir`.
///
/// Creates `dir` if needed and returns the written paths.
///
/// # Errors
///
/// Returns `Io` if the directory or a file cannot be written.
pub fn write_outcome(
    dir: &Path,
    symbol: &str,
    prices: &PriceSeries,
    strategy: &StrategyConfig,
    outcome: &BacktestOutcome,
) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let stem = file_stem(symbol, strategy);
    let csv_path = dir.join(format!("{stem}.csv"));
    let json_path = dir.join(format!("{stem}.json"));

    write_file(&csv_path, &daily_csv(prices, strategy, outcome))?;
    write_file(&json_path, &outcome_json(symbol, outcome)?)?;

    info!(
        symbol,
        strategy = %strategy,
        csv = %csv_path.display(),
        json = %json_path.display(),
        "Wrote backtest report"
    );

    Ok(vec![csv_path, json_path])
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })
}
