//! Statistical math utilities for performance metric calculations.

use super::constants::INITIAL_EQUITY;

/// Calculate the arithmetic mean.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate the population standard deviation (divides by `n`, not `n - 1`).
#[allow(clippy::cast_precision_loss)]
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Compound period returns into an equity curve starting at 1.0.
///
/// The curve has one more point than there are returns.
pub fn equity_curve(returns: &[f64]) -> Vec<f64> {
    let mut curve = Vec::with_capacity(returns.len() + 1);
    let mut equity = INITIAL_EQUITY;
    curve.push(equity);
    for r in returns {
        equity *= 1.0 + r;
        curve.push(equity);
    }
    curve
}

/// Largest peak-to-trough decline as a positive fraction of the peak.
pub fn max_drawdown(curve: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for &equity in curve {
        if equity > peak {
            peak = equity;
        } else if peak > 0.0 {
            max_dd = max_dd.max((peak - equity) / peak);
        }
    }

    max_dd
}
