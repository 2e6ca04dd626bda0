//! Time-series momentum: long while price rose over the trailing window.

use crate::backtest::indicators::window_endpoints;
use crate::backtest::series::Position;
use crate::error::{BacktestError, BacktestResult};

use super::SignalGenerator;

/// Long on day `t` when `close[t-1] > close[t-1-window]`, flat otherwise.
///
/// Days without a close `window` sessions before the previous one stay flat.
/// No shorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Momentum {
    window: usize,
}

impl Momentum {
    /// Create a momentum strategy with the given lookback in days.
    #[must_use]
    pub const fn new(window: usize) -> Self {
        Self { window }
    }

    /// Lookback in days.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }
}

impl SignalGenerator for Momentum {
    fn name(&self) -> String {
        format!("momentum({})", self.window)
    }

    fn validate(&self) -> BacktestResult<()> {
        if self.window == 0 {
            return Err(BacktestError::invalid_config(
                "momentum window must be at least 1",
            ));
        }
        Ok(())
    }

    fn decide(&self, history: &[f64]) -> Position {
        window_endpoints(history, self.window)
            .map_or(Position::Flat, |(past, latest)| Position::long_if(latest > past))
    }
}
