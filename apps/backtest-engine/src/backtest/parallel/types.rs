//! Core types for parallel backtest jobs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backtest::metrics::PerformanceReport;
use crate::backtest::series::PriceSeries;
use crate::backtest::signals::StrategyConfig;

/// A single backtest job to execute.
///
/// Jobs over the same symbol share one immutable price series.
#[derive(Debug, Clone)]
pub struct BacktestJob {
    /// Unique job identifier.
    pub job_id: String,

    /// Instrument the prices belong to.
    pub symbol: String,

    /// Daily closes.
    pub prices: Arc<PriceSeries>,

    /// Strategy to run.
    pub strategy: StrategyConfig,
}

impl BacktestJob {
    /// Create a job identified as `SYMBOL:strategy`.
    #[must_use]
    pub fn new(symbol: impl Into<String>, prices: Arc<PriceSeries>, strategy: StrategyConfig) -> Self {
        let symbol = symbol.into();
        Self {
            job_id: format!("{symbol}:{strategy}"),
            symbol,
            prices,
            strategy,
        }
    }

    /// One job per strategy over the same series.
    #[must_use]
    pub fn for_strategies(
        symbol: &str,
        prices: &Arc<PriceSeries>,
        strategies: &[StrategyConfig],
    ) -> Vec<Self> {
        strategies
            .iter()
            .map(|strategy| Self::new(symbol, Arc::clone(prices), *strategy))
            .collect()
    }
}

/// Result from a single backtest job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestJobResult {
    /// Job identifier.
    pub job_id: String,

    /// Instrument.
    pub symbol: String,

    /// Strategy that ran.
    pub strategy: StrategyConfig,

    /// Performance report, present on success.
    pub report: Option<PerformanceReport>,

    /// Error message if failed.
    pub error: Option<String>,

    /// Execution time in milliseconds.
    pub execution_time_ms: u64,
}

impl BacktestJobResult {
    /// Whether the job produced a report.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.report.is_some()
    }

    /// Sharpe ratio of a successful job.
    #[must_use]
    pub fn sharpe_ratio(&self) -> Option<f64> {
        self.report.as_ref().map(|r| r.sharpe_ratio)
    }
}
