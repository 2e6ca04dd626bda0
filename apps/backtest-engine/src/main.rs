//! Backtest Engine Binary
//!
//! Fetches daily closes, runs every configured strategy against every symbol,
//! and prints a summary.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin backtest-engine
//! ```
//!
//! # Environment Variables
//!
//! - `BACKTEST_CONFIG`: YAML config path (default: `config.yaml`; defaults are
//!   used when the file does not exist)
//! - `BACKTEST_SYMBOLS`: Comma-separated symbols, replacing `data.symbols`
//! - `ALPHA_VANTAGE_API_KEY`: API key when `data.api_key` is empty
//! - `RUST_LOG`: Log filter (default: configured level)

use std::sync::Arc;

use anyhow::{Context, bail};
use backtest_engine::backtest::parallel::{BacktestJob, ParallelBacktester, ParallelResult};
use backtest_engine::backtest::{BacktestRunner, LookAheadChecker, PriceSeries};
use backtest_engine::config::{
    CONFIG_PATH_ENV, Config, DataConfig, EnvOverrides, load_config_with_overrides,
};
use backtest_engine::data::{AlphaVantageClient, load_daily_json, normalize_symbol};
use backtest_engine::report::{self, ReportFormat};
use backtest_engine::telemetry::init_tracing;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let path = std::env::var(CONFIG_PATH_ENV).ok();
    let config = load_config_with_overrides(path.as_deref(), &EnvOverrides::from_env())
        .context("Failed to load configuration")?;

    init_tracing(&config.observability.logging);

    info!(
        symbols = ?config.data.symbols,
        strategies = config.backtest.strategies.len(),
        periods_per_year = config.backtest.periods_per_year,
        "Starting Backtest Engine"
    );

    let series = load_prices(&config.data).await?;
    if series.is_empty() {
        bail!("No price data could be loaded for any symbol");
    }

    if config.validation.look_ahead_check {
        check_look_ahead(&config, &series)?;
    }

    let runner = BacktestRunner::new(config.backtest.periods_per_year)?;
    let jobs: Vec<BacktestJob> = series
        .iter()
        .flat_map(|(symbol, prices)| {
            BacktestJob::for_strategies(symbol, prices, &config.backtest.strategies)
        })
        .collect();

    let backtester = ParallelBacktester::with_runner(config.parallel.clone(), runner);
    let result = tokio::task::spawn_blocking(move || backtester.run_jobs(&jobs))
        .await
        .context("Backtest worker panicked")??;

    match config.report.format {
        ReportFormat::Table => println!("{}", report::render_table(&result)),
        ReportFormat::Json => println!("{}", report::results_json(&result)?),
    }

    if let Some(dir) = &config.report.output_dir {
        export_reports(dir, &runner, &series, &result)?;
    }

    if result.jobs_succeeded == 0 {
        bail!("No backtest succeeded ({} failed)", result.jobs_failed);
    }

    Ok(())
}

/// Load `.env` from the working directory or the nearest ancestor.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Fetch every configured symbol, skipping the ones that fail.
async fn load_prices(data: &DataConfig) -> anyhow::Result<Vec<(String, Arc<PriceSeries>)>> {
    if let Some(file) = &data.prices_file {
        let prices = load_daily_json(file)
            .with_context(|| format!("Failed to load prices from {}", file.display()))?;
        let symbol = data
            .symbols
            .first()
            .cloned()
            .or_else(|| file.file_stem().map(|s| s.to_string_lossy().to_uppercase()))
            .unwrap_or_else(|| "PRICES".to_string());
        return Ok(vec![(symbol, Arc::new(prices))]);
    }

    let client = AlphaVantageClient::from_config(data)?;
    let mut loaded = Vec::with_capacity(data.symbols.len());

    for raw in &data.symbols {
        let symbol = match normalize_symbol(raw) {
            Ok(s) => s,
            Err(e) => {
                warn!(symbol = %raw, error = %e, "Skipping symbol");
                continue;
            }
        };

        match client.fetch_daily(&symbol).await {
            Ok(prices) => loaded.push((symbol, Arc::new(prices))),
            Err(e) => warn!(%symbol, error = %e, "Skipping symbol, try another"),
        }
    }

    Ok(loaded)
}

/// Abort if any strategy reads a same-day or later close.
fn check_look_ahead(config: &Config, series: &[(String, Arc<PriceSeries>)]) -> anyhow::Result<()> {
    let checker = LookAheadChecker::new();
    let mut violations = 0;

    for (symbol, prices) in series {
        for strategy in &config.backtest.strategies {
            match checker.check(prices, strategy) {
                Ok(summary) => {
                    info!(%symbol, %strategy, "{summary}");
                    violations += summary.violations.len();
                }
                Err(e) => warn!(%symbol, %strategy, error = %e, "Look-ahead check skipped"),
            }
        }
    }

    if violations > 0 {
        bail!("Look-ahead check found {violations} violations");
    }
    Ok(())
}

/// Re-run successful jobs in detail and write their CSV and JSON files.
fn export_reports(
    dir: &std::path::Path,
    runner: &BacktestRunner,
    series: &[(String, Arc<PriceSeries>)],
    result: &ParallelResult,
) -> anyhow::Result<()> {
    for job in result.successful_results() {
        let Some((_, prices)) = series.iter().find(|(symbol, _)| *symbol == job.symbol) else {
            continue;
        };
        match runner.run_detailed(prices, &job.strategy) {
            Ok(outcome) => {
                report::write_outcome(dir, &job.symbol, prices, &job.strategy, &outcome)?;
            }
            Err(e) => error!(job_id = %job.job_id, error = %e, "Detailed rerun failed"),
        }
    }
    Ok(())
}
