//! End-to-end scenarios through the public engine API.

use backtest_engine::backtest::{BacktestRunner, LookAheadChecker, PriceSeries, StrategyConfig};
use backtest_engine::error::ErrorCode;
use chrono::NaiveDate;
use test_case::test_case;

fn series(closes: &[f64]) -> PriceSeries {
    let Some(start) = NaiveDate::from_ymd_opt(2024, 1, 2) else {
        panic!("valid start date");
    };
    match PriceSeries::from_pairs(start.iter_days().zip(closes.iter().copied())) {
        Ok(s) => s,
        Err(e) => panic!("test series should be valid: {e}"),
    }
}

#[test_case(
    StrategyConfig::momentum(2),
    &[100.0, 102.0, 101.0, 105.0, 107.0, 110.0],
    &[0, 0, 0, 1, 1, 1];
    "momentum window two"
)]
#[test_case(
    StrategyConfig::crossover(2, 3),
    &[10.0, 11.0, 12.0, 9.0, 8.0, 13.0, 14.0],
    &[0, 0, 0, 1, 0, 0, 1];
    "crossover two three"
)]
#[test_case(
    StrategyConfig::momentum(1),
    &[5.0, 4.0, 3.0, 2.0],
    &[0, 0, 0, 0];
    "momentum never long in a decline"
)]
fn test_scenario_positions(strategy: StrategyConfig, closes: &[f64], expected: &[i8]) {
    let prices = series(closes);
    let Ok(outcome) = BacktestRunner::default().run_detailed(&prices, &strategy) else {
        panic!("{strategy} should run");
    };

    assert_eq!(outcome.signals.values(), expected);

    let realized: f64 = outcome
        .returns
        .points()
        .iter()
        .map(|r| 1.0 + r.strategy_return)
        .product();
    assert!((outcome.report.cumulative_return - (realized - 1.0)).abs() < 1e-12);
}

#[test]
fn test_momentum_scenario_cumulative_return() {
    let prices = series(&[100.0, 102.0, 101.0, 105.0, 107.0, 110.0]);
    let Ok(report) = BacktestRunner::default().run(&prices, &StrategyConfig::momentum(2)) else {
        panic!("scenario should run");
    };

    // Long on the last three days, earning 105 -> 107 -> 110.
    let expected = (107.0 / 105.0) * (110.0 / 107.0) - 1.0;
    assert!((report.cumulative_return - expected).abs() < 1e-12);
    assert!((report.market_cumulative_return - 0.10).abs() < 1e-12);
    assert_eq!(report.equity_curve.len(), 6);
    assert!(report.sharpe_ratio > 0.0);
}

#[test]
fn test_crossover_scenario_loses_on_the_dip() {
    let prices = series(&[10.0, 11.0, 12.0, 9.0, 8.0, 13.0, 14.0]);
    let Ok(report) = BacktestRunner::default().run(&prices, &StrategyConfig::crossover(2, 3)) else {
        panic!("scenario should run");
    };

    assert!((report.cumulative_return - (8.0 / 9.0 - 1.0)).abs() < 1e-12);
    assert!((report.max_drawdown - (1.0 / 9.0)).abs() < 1e-12);
    assert!(report.sharpe_ratio < 0.0);
}

#[test_case(StrategyConfig::momentum(2); "momentum")]
#[test_case(StrategyConfig::crossover(2, 3); "crossover")]
fn test_scenarios_free_of_look_ahead(strategy: StrategyConfig) {
    let prices = series(&[10.0, 11.0, 12.0, 9.0, 8.0, 13.0, 14.0]);
    let Ok(summary) = LookAheadChecker::new().check(&prices, &strategy) else {
        panic!("check should run");
    };
    assert!(summary.is_clean(), "{summary}");
}

#[test_case(&[50.0; 30], StrategyConfig::momentum(5); "flat momentum")]
#[test_case(&[50.0; 30], StrategyConfig::crossover(5, 20); "flat crossover")]
#[test_case(&[9.0, 8.0, 7.0, 6.0, 5.0], StrategyConfig::momentum(1); "never invested")]
fn test_zero_variance_reports_zero_sharpe(closes: &[f64], strategy: StrategyConfig) {
    let Ok(report) = BacktestRunner::default().run(&series(closes), &strategy) else {
        panic!("zero-variance run should succeed");
    };
    assert_eq!(report.cumulative_return, 0.0);
    assert_eq!(report.sharpe_ratio, 0.0);
    assert_eq!(report.exposure, 0.0);
}

#[test_case(&[100.0], StrategyConfig::momentum(1), ErrorCode::InvalidConfig; "single observation")]
#[test_case(&[100.0, 101.0], StrategyConfig::momentum(1), ErrorCode::DegenerateSeries; "single return")]
#[test_case(&[100.0, 101.0, 102.0], StrategyConfig::momentum(0), ErrorCode::InvalidConfig; "zero window")]
#[test_case(&[100.0, 101.0, 102.0], StrategyConfig::crossover(3, 2), ErrorCode::InvalidConfig; "inverted windows")]
fn test_error_codes(closes: &[f64], strategy: StrategyConfig, code: ErrorCode) {
    let Err(err) = BacktestRunner::default().run(&series(closes), &strategy) else {
        panic!("{strategy} on {closes:?} must fail");
    };
    assert_eq!(err.code(), code);
    assert!(err.to_string().starts_with(code.reason()));
}

#[test]
fn test_unsorted_input_is_rejected_then_sortable() {
    let Some(d1) = NaiveDate::from_ymd_opt(2024, 1, 3) else {
        panic!("valid date");
    };
    let Some(d0) = NaiveDate::from_ymd_opt(2024, 1, 2) else {
        panic!("valid date");
    };
    let pairs = [(d1, 101.0), (d0, 100.0)];

    let Err(err) = PriceSeries::from_pairs(pairs) else {
        panic!("unsorted pairs must be rejected");
    };
    assert_eq!(err.code(), ErrorCode::InvalidPriceSeries);

    let points = pairs
        .iter()
        .map(|(d, c)| backtest_engine::backtest::PricePoint::new(*d, *c))
        .collect();
    let Ok(sorted) = PriceSeries::from_unsorted(points) else {
        panic!("sorting constructor should accept unsorted input");
    };
    assert_eq!(sorted.first_date(), Some(d0));
}
