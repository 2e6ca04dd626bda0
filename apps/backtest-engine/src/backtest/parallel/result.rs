//! Result types for parallel backtest execution.

use serde::{Deserialize, Serialize};

use super::types::BacktestJobResult;

/// Result from parallel backtest execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelResult {
    /// Individual job results, in job order.
    pub results: Vec<BacktestJobResult>,

    /// Total execution time in milliseconds.
    pub total_time_ms: u64,

    /// Number of jobs executed.
    pub jobs_executed: u64,

    /// Number of successful jobs.
    pub jobs_succeeded: u64,

    /// Number of failed jobs.
    pub jobs_failed: u64,
}

impl ParallelResult {
    /// Get the success rate.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.jobs_executed == 0 {
            0.0
        } else {
            self.jobs_succeeded as f64 / self.jobs_executed as f64
        }
    }

    /// Get successful results only.
    #[must_use]
    pub fn successful_results(&self) -> Vec<&BacktestJobResult> {
        self.results.iter().filter(|r| r.is_success()).collect()
    }

    /// Get failed results only.
    #[must_use]
    pub fn failed_results(&self) -> Vec<&BacktestJobResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    /// Get the best result by Sharpe ratio.
    ///
    /// Ties go to the later job.
    #[must_use]
    pub fn best_by_sharpe(&self) -> Option<&BacktestJobResult> {
        self.results
            .iter()
            .filter_map(|r| r.sharpe_ratio().map(|sharpe| (r, sharpe)))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(r, _)| r)
    }
}
