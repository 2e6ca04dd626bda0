//! Performance aggregator for backtest return series.

use tracing::debug;

use super::constants::{TRADING_DAYS, ZERO_VARIANCE_SHARPE, ZERO_VARIANCE_TOLERANCE};
use super::math::{equity_curve, max_drawdown, mean, population_std_dev};
use super::types::PerformanceReport;
use crate::backtest::series::ReturnSeries;
use crate::error::{BacktestError, BacktestResult};

/// Fewest return periods statistics are defined for.
const MIN_PERIODS: usize = 2;

/// Aggregates a return series into a [`PerformanceReport`].
///
/// # Boundary conventions
///
/// - Fewer than two returns: `DegenerateSeries` error.
/// - Any non-finite return: `DegenerateSeries` error.
/// - Population stddev at or below [`ZERO_VARIANCE_TOLERANCE`] (flat prices, a
///   strategy that never invests): Sharpe ratio is [`ZERO_VARIANCE_SHARPE`].
///   This is the only case where a value is substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceAggregator {
    periods_per_year: u32,
}

impl Default for PerformanceAggregator {
    fn default() -> Self {
        Self {
            periods_per_year: TRADING_DAYS,
        }
    }
}

impl PerformanceAggregator {
    /// Create an aggregator annualizing with `periods_per_year`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `periods_per_year` is zero.
    pub fn new(periods_per_year: u32) -> BacktestResult<Self> {
        if periods_per_year == 0 {
            return Err(BacktestError::invalid_config(
                "periods_per_year must be positive",
            ));
        }
        Ok(Self { periods_per_year })
    }

    /// Annualization factor.
    #[must_use]
    pub const fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Calculate all performance metrics.
    ///
    /// Pure and deterministic: the same series always yields a bit-identical
    /// report.
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate(&self, returns: &ReturnSeries) -> BacktestResult<PerformanceReport> {
        if returns.len() < MIN_PERIODS {
            return Err(BacktestError::degenerate(format!(
                "need at least {MIN_PERIODS} returns, got {}",
                returns.len()
            )));
        }

        let strategy = returns.strategy_returns();
        let market = returns.market_returns();

        if let Some(point) = returns
            .points()
            .iter()
            .find(|p| !p.strategy_return.is_finite() || !p.market_return.is_finite())
        {
            return Err(BacktestError::degenerate(format!(
                "non-finite return on {}",
                point.date
            )));
        }

        let annualizer = f64::from(self.periods_per_year).sqrt();
        let (sharpe_ratio, annualized_volatility) = self.sharpe_and_volatility(&strategy)?;

        let curve = equity_curve(&strategy);
        let cumulative_return = curve.last().copied().unwrap_or(1.0) - 1.0;
        let market_cumulative_return = market.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0;
        let invested = returns
            .points()
            .iter()
            .filter(|p| p.position.is_invested())
            .count();

        debug!(
            periods = returns.len(),
            annualizer,
            cumulative_return,
            sharpe_ratio,
            "Aggregated return series"
        );

        Ok(PerformanceReport {
            cumulative_return,
            sharpe_ratio,
            max_drawdown: max_drawdown(&curve),
            equity_curve: curve,
            market_cumulative_return,
            annualized_volatility,
            exposure: invested as f64 / returns.len() as f64,
            periods: returns.len(),
            periods_per_year: self.periods_per_year,
        })
    }

    /// Sharpe = mean / population stddev * sqrt(periods per year), zero
    /// risk-free rate.
    fn sharpe_and_volatility(&self, returns: &[f64]) -> BacktestResult<(f64, f64)> {
        let (Some(avg), Some(std)) = (mean(returns), population_std_dev(returns)) else {
            return Err(BacktestError::degenerate("empty return series"));
        };

        let annualizer = f64::from(self.periods_per_year).sqrt();

        if std <= ZERO_VARIANCE_TOLERANCE {
            return Ok((ZERO_VARIANCE_SHARPE, 0.0));
        }

        Ok((avg / std * annualizer, std * annualizer))
    }
}

/// Aggregate `returns` annualizing with `periods_per_year`.
///
/// # Errors
///
/// See [`PerformanceAggregator::new`] and [`PerformanceAggregator::aggregate`].
pub fn aggregate(returns: &ReturnSeries, periods_per_year: u32) -> BacktestResult<PerformanceReport> {
    PerformanceAggregator::new(periods_per_year)?.aggregate(returns)
}
