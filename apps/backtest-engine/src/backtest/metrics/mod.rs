//! Performance aggregation for backtest evaluation.
//!
//! Turns a return series into:
//! - Equity curve (growth of one unit of capital)
//! - Cumulative return
//! - Annualized Sharpe ratio (zero risk-free rate, population stddev)
//! - Annualized volatility, maximum drawdown and market exposure

mod calculator;
mod constants;
mod format;
mod math;
mod types;

pub use calculator::{PerformanceAggregator, aggregate};
pub use constants::{TRADING_DAYS, ZERO_VARIANCE_SHARPE, ZERO_VARIANCE_TOLERANCE};
pub use format::{format_decimal, format_pct, format_ratio};
pub use types::PerformanceReport;
