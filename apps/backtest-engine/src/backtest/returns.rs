//! Period returns from prices and lagged positions.
//!
//! The position decided for day `t-1` earns the market return of day `t`:
//! `strategy_return[t] = position[t-1] * (close[t] / close[t-1] - 1)`.

use tracing::debug;

use super::series::{PriceSeries, ReturnPoint, ReturnSeries, SignalSeries};
use crate::error::{BacktestError, BacktestResult};

/// Compute market and strategy returns for every day after the first.
///
/// # Errors
///
/// Returns `MisalignedSeries` if `prices` and `signals` differ in length or in
/// any date.
pub fn compute(prices: &PriceSeries, signals: &SignalSeries) -> BacktestResult<ReturnSeries> {
    if prices.len() != signals.len() {
        return Err(BacktestError::misaligned(format!(
            "{} prices but {} signals",
            prices.len(),
            signals.len()
        )));
    }

    if let Some((price, signal)) = prices
        .points()
        .iter()
        .zip(signals.points())
        .find(|(p, s)| p.date != s.date)
    {
        return Err(BacktestError::misaligned(format!(
            "price dated {} paired with signal dated {}",
            price.date, signal.date
        )));
    }

    let points: Vec<ReturnPoint> = prices
        .points()
        .windows(2)
        .zip(signals.points())
        .map(|(pair, carried)| {
            let market_return = pair[1].close / pair[0].close - 1.0;
            ReturnPoint {
                date: pair[1].date,
                market_return,
                strategy_return: carried.position.as_f64() * market_return,
                position: carried.position,
            }
        })
        .collect();

    debug!(
        periods = points.len(),
        first = ?points.first().map(|p| p.date),
        last = ?points.last().map(|p| p.date),
        "Computed period returns"
    );

    Ok(ReturnSeries::new(points))
}
