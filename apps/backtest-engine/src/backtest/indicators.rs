//! Trailing price indicators.
//!
//! Series functions return one value per input close, `None` until enough
//! history exists. The window helpers operate on "everything known so far" and
//! are what the signal generators call with the closes strictly before the
//! decision day, so the plotted indicator and the trading rule share one
//! definition.

/// Mean of the last `window` values, or `None` if fewer are available.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// The value `window` periods before the last one, paired with the last value.
///
/// Returns `(past, latest)`, or `None` if the history is shorter than
/// `window + 1` values.
#[must_use]
pub fn window_endpoints(values: &[f64], window: usize) -> Option<(f64, f64)> {
    let last = values.len().checked_sub(1)?;
    let first = last.checked_sub(window)?;
    Some((values[first], values[last]))
}

/// Fractional change over the last `window` periods.
#[must_use]
pub fn trailing_change(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 {
        return None;
    }
    window_endpoints(values, window).map(|(past, latest)| latest / past - 1.0)
}

/// Simple moving average of each close over the `window` closes ending at it.
#[must_use]
pub fn sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    (1..=closes.len())
        .map(|end| trailing_mean(&closes[..end], window))
        .collect()
}

/// Percentage change of each close versus the close `window` days earlier.
#[must_use]
pub fn momentum(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    (1..=closes.len())
        .map(|end| trailing_change(&closes[..end], window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_mean() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(trailing_mean(&values, 2), Some(3.5));
        assert_eq!(trailing_mean(&values, 4), Some(2.5));
        assert_eq!(trailing_mean(&values, 5), None);
        assert_eq!(trailing_mean(&values, 0), None);
    }

    #[test]
    fn test_window_endpoints() {
        let values = [10.0, 11.0, 12.0];
        assert_eq!(window_endpoints(&values, 2), Some((10.0, 12.0)));
        assert_eq!(window_endpoints(&values, 3), None);
        assert_eq!(window_endpoints(&[], 1), None);
    }

    #[test]
    fn test_sma_series_alignment() {
        let closes = [10.0, 11.0, 12.0, 9.0];
        let series = sma(&closes, 3);
        assert_eq!(series.len(), closes.len());
        assert_eq!(series[0], None);
        assert_eq!(series[1], None);
        assert_eq!(series[2], Some(11.0));
        assert_eq!(series[3], Some((11.0 + 12.0 + 9.0) / 3.0));
    }

    #[test]
    fn test_momentum_series_matches_pct_change() {
        let closes = [100.0, 102.0, 101.0, 105.0];
        let series = momentum(&closes, 2);
        assert_eq!(series[..2], [None, None]);
        let Some(m2) = series[2] else {
            panic!("momentum defined once window history exists");
        };
        assert!((m2 - 0.01).abs() < 1e-12);
        let Some(m3) = series[3] else {
            panic!("momentum defined once window history exists");
        };
        assert!((m3 - (105.0 / 102.0 - 1.0)).abs() < 1e-12);
    }
}
