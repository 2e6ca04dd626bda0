//! Per-day CSV export.

use std::fmt::Write;

use crate::backtest::indicators;
use crate::backtest::runner::BacktestOutcome;
use crate::backtest::series::PriceSeries;
use crate::backtest::signals::StrategyConfig;

/// Indicator columns plotted alongside the close for a strategy.
fn indicator_columns(closes: &[f64], strategy: &StrategyConfig) -> Vec<(String, Vec<Option<f64>>)> {
    match *strategy {
        StrategyConfig::Momentum { window } => {
            vec![(format!("momentum_{window}"), indicators::momentum(closes, window))]
        }
        StrategyConfig::MovingAverageCrossover {
            short_window,
            long_window,
        } => vec![
            (format!("sma_{short_window}"), indicators::sma(closes, short_window)),
            (format!("sma_{long_window}"), indicators::sma(closes, long_window)),
        ],
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

/// One row per price observation: date, close, indicators, position, market
/// return, strategy return, equity.
///
/// Return cells are empty on the first day; equity starts at 1.
#[must_use]
pub fn daily_csv(prices: &PriceSeries, strategy: &StrategyConfig, outcome: &BacktestOutcome) -> String {
    let closes = prices.closes();
    let columns = indicator_columns(&closes, strategy);

    let mut csv = String::from("date,close");
    for (name, _) in &columns {
        let _ = write!(csv, ",{name}");
    }
    csv.push_str(",position,market_return,strategy_return,equity\n");

    let returns = outcome.returns.points();
    let equity = &outcome.report.equity_curve;

    for (t, (price, signal)) in prices.points().iter().zip(outcome.signals.points()).enumerate() {
        let _ = write!(csv, "{},{}", price.date, price.close);
        for (_, values) in &columns {
            let _ = write!(csv, ",{}", cell(values.get(t).copied().flatten()));
        }

        let period = t.checked_sub(1).and_then(|i| returns.get(i));
        let _ = writeln!(
            csv,
            ",{},{},{},{}",
            signal.position.value(),
            cell(period.map(|r| r.market_return)),
            cell(period.map(|r| r.strategy_return)),
            cell(equity.get(t).copied()),
        );
    }

    csv
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::backtest::runner::BacktestRunner;

    #[test]
    fn test_daily_csv_layout() {
        let Some(start) = NaiveDate::from_ymd_opt(2024, 1, 1) else {
            panic!("valid start date");
        };
        let prices = match PriceSeries::from_pairs(
            start.iter_days().zip([10.0, 11.0, 12.0, 9.0, 8.0, 13.0, 14.0]),
        ) {
            Ok(p) => p,
            Err(e) => panic!("valid series: {e}"),
        };
        let strategy = StrategyConfig::crossover(2, 3);
        let Ok(outcome) = BacktestRunner::default().run_detailed(&prices, &strategy) else {
            panic!("backtest should run");
        };

        let csv = daily_csv(&prices, &strategy, &outcome);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "date,close,sma_2,sma_3,position,market_return,strategy_return,equity"
        );
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "2024-01-01,10,,,0,,,1");
        assert!(lines[3].starts_with("2024-01-03,12,11.5,11,0,"));
        assert!(lines[4].contains(",1,"));
    }
}
