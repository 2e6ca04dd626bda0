//! Single-pass backtest orchestration.
//!
//! `signals -> returns -> metrics`, each stage fed only the previous stage's
//! output. Errors propagate unchanged.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{Level, debug, info, span};

use super::metrics::{PerformanceAggregator, PerformanceReport};
use super::returns;
use super::series::{PriceSeries, ReturnSeries, SignalSeries};
use super::signals::SignalGenerator;
use crate::error::BacktestResult;

/// Everything one backtest produced, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestOutcome {
    /// Strategy display name.
    pub strategy: String,
    /// One position per price observation.
    pub signals: SignalSeries,
    /// One return per day after the first.
    pub returns: ReturnSeries,
    /// Aggregated metrics.
    pub report: PerformanceReport,
}

/// Runs a strategy over a price series.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktestRunner {
    aggregator: PerformanceAggregator,
}

impl BacktestRunner {
    /// Create a runner annualizing with `periods_per_year`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `periods_per_year` is zero.
    pub fn new(periods_per_year: u32) -> BacktestResult<Self> {
        Ok(Self {
            aggregator: PerformanceAggregator::new(periods_per_year)?,
        })
    }

    /// Annualization factor used for the reports.
    #[must_use]
    pub const fn periods_per_year(&self) -> u32 {
        self.aggregator.periods_per_year()
    }

    /// Run and keep only the report.
    ///
    /// # Errors
    ///
    /// See [`BacktestRunner::run_detailed`].
    pub fn run<S>(&self, prices: &PriceSeries, strategy: &S) -> BacktestResult<PerformanceReport>
    where
        S: SignalGenerator + ?Sized,
    {
        self.run_detailed(prices, strategy).map(|outcome| outcome.report)
    }

    /// Run and keep every intermediate series.
    ///
    /// # Errors
    ///
    /// Returns the first error from signal generation (`InvalidConfig`),
    /// return computation (`MisalignedSeries`) or aggregation
    /// (`DegenerateSeries`).
    pub fn run_detailed<S>(
        &self,
        prices: &PriceSeries,
        strategy: &S,
    ) -> BacktestResult<BacktestOutcome>
    where
        S: SignalGenerator + ?Sized,
    {
        let name = strategy.name();
        let _span = span!(Level::DEBUG, "backtest", strategy = %name).entered();
        let start = Instant::now();

        info!(
            strategy = %name,
            observations = prices.len(),
            first = ?prices.first_date(),
            last = ?prices.last_date(),
            "Starting backtest"
        );

        let signals = strategy.generate(prices)?;
        debug!(
            signals = signals.len(),
            invested = signals.points().iter().filter(|s| s.position.is_invested()).count(),
            "Generated signals"
        );

        let returns = returns::compute(prices, &signals)?;
        let report = self.aggregator.aggregate(&returns)?;

        info!(
            strategy = %name,
            cumulative_return = report.cumulative_return,
            sharpe_ratio = report.sharpe_ratio,
            elapsed_us = start.elapsed().as_micros(),
            "Backtest complete"
        );

        Ok(BacktestOutcome {
            strategy: name,
            signals,
            returns,
            report,
        })
    }
}
