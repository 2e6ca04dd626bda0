//! Simple moving average crossover.

use crate::backtest::indicators::trailing_mean;
use crate::backtest::series::Position;
use crate::error::{BacktestError, BacktestResult};

use super::SignalGenerator;

/// Long on day `t` when the short SMA exceeds the long SMA, both taken over
/// windows ending at day `t-1`.
///
/// Flat until `long_window` closes precede the decision day. No shorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverageCrossover {
    short_window: usize,
    long_window: usize,
}

impl MovingAverageCrossover {
    /// Create a crossover strategy.
    #[must_use]
    pub const fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    /// Short SMA window.
    #[must_use]
    pub const fn short_window(&self) -> usize {
        self.short_window
    }

    /// Long SMA window.
    #[must_use]
    pub const fn long_window(&self) -> usize {
        self.long_window
    }
}

impl SignalGenerator for MovingAverageCrossover {
    fn name(&self) -> String {
        format!("ma_crossover({},{})", self.short_window, self.long_window)
    }

    fn validate(&self) -> BacktestResult<()> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err(BacktestError::invalid_config(
                "moving average windows must be at least 1",
            ));
        }
        if self.short_window >= self.long_window {
            return Err(BacktestError::invalid_config(format!(
                "short window {} must be less than long window {}",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }

    fn decide(&self, history: &[f64]) -> Position {
        match (
            trailing_mean(history, self.short_window),
            trailing_mean(history, self.long_window),
        ) {
            (Some(short), Some(long)) => Position::long_if(short > long),
            _ => Position::Flat,
        }
    }
}
