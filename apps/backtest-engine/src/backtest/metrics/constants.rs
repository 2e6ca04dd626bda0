//! Constants for performance metric calculations.

/// Trading days per year, the default annualization factor for daily data.
pub const TRADING_DAYS: u32 = 252;

/// Starting value of the equity curve.
pub const INITIAL_EQUITY: f64 = 1.0;

/// Population standard deviations at or below this are treated as zero
/// variance. Floating-point noise on a constant return stream (e.g. three
/// identical 1% days) leaves a residual around 1e-18 that would otherwise
/// produce an astronomically large Sharpe ratio.
pub const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Sharpe ratio reported for a zero-variance return series.
pub const ZERO_VARIANCE_SHARPE: f64 = 0.0;
