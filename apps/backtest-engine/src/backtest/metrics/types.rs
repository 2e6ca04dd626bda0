//! Type definitions for performance metrics.

use serde::{Deserialize, Serialize};

/// Aggregated performance of one strategy over one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Final equity minus one (decimal, e.g., 0.15 = 15%).
    pub cumulative_return: f64,
    /// Annualized Sharpe ratio; 0.0 for a zero-variance return series.
    pub sharpe_ratio: f64,
    /// Growth of one unit of capital; `equity_curve[0] == 1.0` and one point
    /// per return period after it.
    pub equity_curve: Vec<f64>,
    /// Buy-and-hold return of the instrument over the same periods.
    pub market_cumulative_return: f64,
    /// Population stddev of strategy returns, annualized.
    pub annualized_volatility: f64,
    /// Maximum drawdown of the equity curve (positive decimal, e.g., 0.20 = 20%).
    pub max_drawdown: f64,
    /// Fraction of periods in which a position was held.
    pub exposure: f64,
    /// Number of return periods.
    pub periods: usize,
    /// Annualization factor used.
    pub periods_per_year: u32,
}

impl PerformanceReport {
    /// Final value of the equity curve.
    #[must_use]
    pub fn final_equity(&self) -> f64 {
        self.equity_curve.last().copied().unwrap_or(1.0)
    }

    /// Strategy return in excess of buy-and-hold.
    #[must_use]
    pub fn excess_over_market(&self) -> f64 {
        self.cumulative_return - self.market_cumulative_return
    }
}
