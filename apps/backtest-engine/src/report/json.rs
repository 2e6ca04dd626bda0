//! JSON export.

use serde::Serialize;

use super::ReportError;
use crate::backtest::metrics::PerformanceReport;
use crate::backtest::parallel::{BacktestJobResult, ParallelResult};
use crate::backtest::runner::BacktestOutcome;

#[derive(Serialize)]
struct RunDocument<'a> {
    jobs_executed: u64,
    jobs_succeeded: u64,
    jobs_failed: u64,
    total_time_ms: u64,
    best_by_sharpe: Option<&'a str>,
    results: &'a [BacktestJobResult],
}

#[derive(Serialize)]
struct OutcomeDocument<'a> {
    symbol: &'a str,
    strategy: &'a str,
    report: &'a PerformanceReport,
    positions: Vec<i8>,
}

/// Pretty JSON for a whole run.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn results_json(result: &ParallelResult) -> Result<String, ReportError> {
    let document = RunDocument {
        jobs_executed: result.jobs_executed,
        jobs_succeeded: result.jobs_succeeded,
        jobs_failed: result.jobs_failed,
        total_time_ms: result.total_time_ms,
        best_by_sharpe: result.best_by_sharpe().map(|r| r.job_id.as_str()),
        results: &result.results,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Pretty JSON for one job: its report and daily positions.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn outcome_json(symbol: &str, outcome: &BacktestOutcome) -> Result<String, ReportError> {
    let document = OutcomeDocument {
        symbol,
        strategy: &outcome.strategy,
        report: &outcome.report,
        positions: outcome.signals.values(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
