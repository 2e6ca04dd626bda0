//! Console summary table.

use std::fmt::Write;

use crate::backtest::metrics::{format_pct, format_ratio};
use crate::backtest::parallel::ParallelResult;

/// Render one row per job, then the best job by Sharpe ratio.
#[must_use]
pub fn render_table(result: &ParallelResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:<20} {:>10} {:>10} {:>8} {:>10} {:>10} {:>9}",
        "SYMBOL", "STRATEGY", "RETURN", "MARKET", "SHARPE", "VOL", "MAX DD", "EXPOSURE"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));

    for job in &result.results {
        let strategy = job.strategy.to_string();
        match (&job.report, &job.error) {
            (Some(report), _) => {
                let _ = writeln!(
                    out,
                    "{:<8} {:<20} {:>10} {:>10} {:>8} {:>10} {:>10} {:>9}",
                    job.symbol,
                    strategy,
                    format_pct(report.cumulative_return),
                    format_pct(report.market_cumulative_return),
                    format_ratio(report.sharpe_ratio),
                    format_pct(report.annualized_volatility),
                    format_pct(report.max_drawdown),
                    format_pct(report.exposure),
                );
            }
            (None, error) => {
                let _ = writeln!(
                    out,
                    "{:<8} {:<20} FAILED: {}",
                    job.symbol,
                    strategy,
                    error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{}/{} jobs succeeded in {} ms",
        result.jobs_succeeded, result.jobs_executed, result.total_time_ms
    );
    if let Some(best) = result.best_by_sharpe() {
        let _ = writeln!(
            out,
            "Best by Sharpe: {} ({})",
            best.job_id,
            best.sharpe_ratio().map_or_else(|| "N/A".to_string(), format_ratio)
        );
    }

    out
}
