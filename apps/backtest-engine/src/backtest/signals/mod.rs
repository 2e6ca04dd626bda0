//! Signal generation: turning a price series into one position per day.
//!
//! Every strategy implements [`SignalGenerator`]. The trait hands a strategy
//! only the closes strictly before the day being decided, so a generator has
//! no way to read that day's close.
//!
//! [`StrategyConfig`] is the tagged configuration form of the built-in
//! strategies and is itself a generator, dispatching to [`Momentum`] or
//! [`MovingAverageCrossover`].

mod crossover;
mod momentum;

use serde::{Deserialize, Serialize};

use super::series::{Position, PriceSeries, SignalSeries};
use crate::error::{BacktestError, BacktestResult};

pub use crossover::MovingAverageCrossover;
pub use momentum::Momentum;

/// Fewest observations a signal series can be generated from.
pub const MIN_OBSERVATIONS: usize = 2;

/// A rule-based strategy mapping price history to a position.
pub trait SignalGenerator: Send + Sync {
    /// Stable display name, e.g. `momentum(5)`.
    fn name(&self) -> String;

    /// Check the strategy parameters.
    fn validate(&self) -> BacktestResult<()>;

    /// Decide the position for a day given every close before it.
    ///
    /// `history` is empty for the first day of the series.
    fn decide(&self, history: &[f64]) -> Position;

    /// Generate one position per observation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the parameters are invalid or the series has
    /// fewer than two observations.
    fn generate(&self, prices: &PriceSeries) -> BacktestResult<SignalSeries> {
        self.validate()?;

        if prices.len() < MIN_OBSERVATIONS {
            return Err(BacktestError::invalid_config(format!(
                "{} needs at least {MIN_OBSERVATIONS} observations, got {}",
                self.name(),
                prices.len()
            )));
        }

        let closes = prices.closes();
        let positions = (0..closes.len())
            .map(|t| self.decide(&closes[..t]))
            .collect();

        SignalSeries::from_positions(prices, positions)
    }
}

/// Configuration of a built-in strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Long while price rose over the trailing window.
    Momentum {
        /// Lookback in trading days.
        window: usize,
    },
    /// Long while the short SMA is above the long SMA.
    #[serde(alias = "ma_crossover")]
    MovingAverageCrossover {
        /// Short SMA window.
        short_window: usize,
        /// Long SMA window.
        long_window: usize,
    },
}

impl StrategyConfig {
    /// Momentum strategy with the given lookback.
    #[must_use]
    pub const fn momentum(window: usize) -> Self {
        Self::Momentum { window }
    }

    /// Moving average crossover with the given windows.
    #[must_use]
    pub const fn crossover(short_window: usize, long_window: usize) -> Self {
        Self::MovingAverageCrossover {
            short_window,
            long_window,
        }
    }

    /// The strategies run when none are configured: 5-day momentum and a
    /// 5/20 crossover.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::momentum(5), Self::crossover(5, 20)]
    }

    /// Number of closes needed before the strategy can take a position.
    #[must_use]
    pub const fn warmup(&self) -> usize {
        match self {
            Self::Momentum { window } => window.saturating_add(1),
            Self::MovingAverageCrossover { long_window, .. } => *long_window,
        }
    }
}

impl SignalGenerator for StrategyConfig {
    fn name(&self) -> String {
        match self {
            Self::Momentum { window } => Momentum::new(*window).name(),
            Self::MovingAverageCrossover {
                short_window,
                long_window,
            } => MovingAverageCrossover::new(*short_window, *long_window).name(),
        }
    }

    fn validate(&self) -> BacktestResult<()> {
        match self {
            Self::Momentum { window } => Momentum::new(*window).validate(),
            Self::MovingAverageCrossover {
                short_window,
                long_window,
            } => MovingAverageCrossover::new(*short_window, *long_window).validate(),
        }
    }

    fn decide(&self, history: &[f64]) -> Position {
        match self {
            Self::Momentum { window } => Momentum::new(*window).decide(history),
            Self::MovingAverageCrossover {
                short_window,
                long_window,
            } => MovingAverageCrossover::new(*short_window, *long_window).decide(history),
        }
    }
}

impl std::fmt::Display for StrategyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Generate signals for `prices` under `strategy`.
///
/// # Errors
///
/// See [`SignalGenerator::generate`].
pub fn generate(prices: &PriceSeries, strategy: &StrategyConfig) -> BacktestResult<SignalSeries> {
    strategy.generate(prices)
}
