//! Backtest run configuration.

use serde::{Deserialize, Serialize};

use crate::backtest::metrics::TRADING_DAYS;
use crate::backtest::signals::StrategyConfig;

/// Strategies and annualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestSettings {
    /// Annualization factor for the Sharpe ratio.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
    /// Strategies run against every symbol.
    #[serde(default = "StrategyConfig::defaults")]
    pub strategies: Vec<StrategyConfig>,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            periods_per_year: default_periods_per_year(),
            strategies: StrategyConfig::defaults(),
        }
    }
}

const fn default_periods_per_year() -> u32 {
    TRADING_DAYS
}
