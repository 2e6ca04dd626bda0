//! Look-ahead bias detection for signal generators.
//!
//! A position for day `t` may only depend on closes before `t`. The checker
//! verifies this empirically: for each day it rebuilds the series up to and
//! including `t`, moves `close[t]` far up and far down, regenerates, and
//! compares the day-`t` position against the one produced on the full series.
//! Truncating at `t` also exposes any dependence on later closes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::series::{Position, PricePoint, PriceSeries};
use super::signals::{MIN_OBSERVATIONS, SignalGenerator};
use crate::error::BacktestResult;

/// Multipliers applied to the close being tested.
const PERTURBATIONS: [f64; 2] = [0.5, 2.0];

/// A day whose position moved when its own close was perturbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookAheadViolation {
    /// Decision day.
    pub date: chrono::NaiveDate,
    /// Position on the unmodified series.
    pub original: Position,
    /// Position after perturbing the day's close.
    pub perturbed: Position,
}

/// Outcome of a look-ahead check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookAheadSummary {
    /// Days checked.
    pub checked: usize,
    /// Days that failed.
    pub violations: Vec<LookAheadViolation>,
}

impl LookAheadSummary {
    /// True if no day depended on its own or a later close.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl std::fmt::Display for LookAheadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Look-ahead check: {}/{} days clean, {} violations",
            self.checked - self.violations.len(),
            self.checked,
            self.violations.len()
        )
    }
}

/// Checks signal generators for look-ahead bias.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookAheadChecker;

impl LookAheadChecker {
    /// Create a checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Check every day from the second observation on.
    ///
    /// The first day is decided with no history at all and is not re-checked.
    ///
    /// # Errors
    ///
    /// Returns any error from generating signals on the full series.
    pub fn check<S>(&self, prices: &PriceSeries, strategy: &S) -> BacktestResult<LookAheadSummary>
    where
        S: SignalGenerator + ?Sized,
    {
        let original = strategy.generate(prices)?;
        let mut summary = LookAheadSummary::default();

        for (t, signal) in original
            .points()
            .iter()
            .enumerate()
            .skip(MIN_OBSERVATIONS - 1)
        {
            summary.checked += 1;
            let prefix = prices.prefix(t + 1);

            for factor in PERTURBATIONS {
                let perturbed = Self::perturb_last(&prefix, factor)?;
                let positions = strategy.generate(&perturbed)?.positions();
                let Some(&position) = positions.last() else {
                    continue;
                };

                if position != signal.position {
                    warn!(
                        strategy = %strategy.name(),
                        date = %signal.date,
                        original = signal.position.value(),
                        perturbed = position.value(),
                        "Position depends on same-day close"
                    );
                    summary.violations.push(LookAheadViolation {
                        date: signal.date,
                        original: signal.position,
                        perturbed: position,
                    });
                    break;
                }
            }
        }

        debug!(
            strategy = %strategy.name(),
            checked = summary.checked,
            violations = summary.violations.len(),
            "Look-ahead check finished"
        );

        Ok(summary)
    }

    fn perturb_last(prefix: &PriceSeries, factor: f64) -> BacktestResult<PriceSeries> {
        let mut points: Vec<PricePoint> = prefix.points().to_vec();
        if let Some(last) = points.last_mut() {
            last.close *= factor;
        }
        PriceSeries::new(points)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::backtest::series::SignalSeries;
    use crate::backtest::signals::StrategyConfig;

    fn series(closes: &[f64]) -> PriceSeries {
        let Some(start) = NaiveDate::from_ymd_opt(2024, 5, 1) else {
            panic!("valid start date");
        };
        match PriceSeries::from_pairs(start.iter_days().zip(closes.iter().copied())) {
            Ok(s) => s,
            Err(e) => panic!("test series should be valid: {e}"),
        }
    }

    /// Decides day `t` from `close[t]` by overriding `generate`.
    struct Peeking;

    impl SignalGenerator for Peeking {
        fn name(&self) -> String {
            "peeking".to_string()
        }

        fn validate(&self) -> BacktestResult<()> {
            Ok(())
        }

        fn decide(&self, _history: &[f64]) -> Position {
            Position::Flat
        }

        fn generate(&self, prices: &PriceSeries) -> BacktestResult<SignalSeries> {
            let closes = prices.closes();
            let positions = closes
                .iter()
                .enumerate()
                .map(|(t, c)| Position::long_if(t > 0 && *c > closes[t - 1]))
                .collect();
            SignalSeries::from_positions(prices, positions)
        }
    }

    #[test]
    fn test_builtin_strategies_are_clean() {
        let prices = series(&[10.0, 11.0, 12.0, 9.0, 8.0, 13.0, 14.0]);
        for strategy in [StrategyConfig::momentum(2), StrategyConfig::crossover(2, 3)] {
            let Ok(summary) = LookAheadChecker::new().check(&prices, &strategy) else {
                panic!("check should run for {strategy}");
            };
            assert!(summary.is_clean(), "{strategy}: {summary}");
            assert_eq!(summary.checked, 6);
        }
    }

    #[test]
    fn test_peeking_generator_is_flagged() {
        let prices = series(&[10.0, 11.0, 12.0, 9.0, 8.0, 13.0]);
        let Ok(summary) = LookAheadChecker::new().check(&prices, &Peeking) else {
            panic!("check should run");
        };
        assert!(!summary.is_clean());
        assert_eq!(summary.violations.len(), 5);
        assert_eq!(summary.violations[0].original, Position::Long);
        assert_eq!(summary.violations[0].perturbed, Position::Flat);
    }

    #[test]
    fn test_summary_display() {
        let summary = LookAheadSummary {
            checked: 10,
            violations: vec![],
        };
        assert_eq!(
            summary.to_string(),
            "Look-ahead check: 10/10 days clean, 0 violations"
        );
    }
}
