//! Parallel backtest executor using Rayon.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{Level, debug, info, span, warn};

use crate::backtest::runner::BacktestRunner;

use super::config::ParallelConfig;
use super::error::ParallelError;
use super::progress::ProgressTracker;
use super::result::ParallelResult;
use super::types::{BacktestJob, BacktestJobResult};

/// Parallel backtest executor.
#[derive(Debug, Clone)]
pub struct ParallelBacktester {
    config: ParallelConfig,
    runner: BacktestRunner,
}

impl ParallelBacktester {
    /// Create a backtester with the default runner.
    #[must_use]
    pub fn new(config: ParallelConfig) -> Self {
        Self::with_runner(config, BacktestRunner::default())
    }

    /// Create a backtester running every job through `runner`.
    #[must_use]
    pub const fn with_runner(config: ParallelConfig, runner: BacktestRunner) -> Self {
        Self { config, runner }
    }

    /// Get effective thread count.
    #[must_use]
    pub fn effective_thread_count(&self) -> usize {
        if self.config.max_threads > 0 {
            self.config.max_threads
        } else {
            rayon::current_num_threads()
        }
    }

    /// Run backtest jobs, in parallel once there are enough of them.
    ///
    /// Results come back in job order. A failing job is recorded in its
    /// result and does not affect the others.
    ///
    /// # Errors
    ///
    /// Returns error if no jobs are provided or a dedicated thread pool
    /// cannot be built.
    #[allow(clippy::cast_possible_truncation)]
    pub fn run_jobs(&self, jobs: &[BacktestJob]) -> Result<ParallelResult, ParallelError> {
        if jobs.is_empty() {
            return Err(ParallelError::NoJobs);
        }

        let tracker = ProgressTracker::new(jobs.len() as u64);
        let start_time = Instant::now();

        info!(
            "Starting parallel backtest: {} jobs, {} threads",
            jobs.len(),
            self.effective_thread_count()
        );

        let results = if jobs.len() < self.config.min_parallel_jobs {
            self.run_sequential(jobs, &tracker)
        } else if self.config.max_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.max_threads)
                .build()
                .map_err(|e| ParallelError::ThreadPoolError {
                    message: e.to_string(),
                })?;
            pool.install(|| self.run_parallel(jobs, &tracker))
        } else {
            self.run_parallel(jobs, &tracker)
        };

        let elapsed = start_time.elapsed();
        let progress = tracker.progress();

        info!(
            "Parallel backtest complete: {}/{} succeeded in {:.2}s",
            progress.succeeded,
            progress.total,
            elapsed.as_secs_f64()
        );

        Ok(ParallelResult {
            results,
            total_time_ms: elapsed.as_millis() as u64,
            jobs_executed: jobs.len() as u64,
            jobs_succeeded: progress.succeeded,
            jobs_failed: progress.failed,
        })
    }

    fn run_parallel(&self, jobs: &[BacktestJob], tracker: &ProgressTracker) -> Vec<BacktestJobResult> {
        jobs.par_iter()
            .map(|job| {
                let result = self.execute_job(job);
                tracker.record(result.is_success());

                if self.config.track_progress {
                    let progress = tracker.progress();
                    debug!(
                        "Progress: {:.1}% ({}/{})",
                        progress.percentage(),
                        progress.completed(),
                        progress.total
                    );
                }

                result
            })
            .collect()
    }

    fn run_sequential(&self, jobs: &[BacktestJob], tracker: &ProgressTracker) -> Vec<BacktestJobResult> {
        jobs.iter()
            .map(|job| {
                let result = self.execute_job(job);
                tracker.record(result.is_success());
                result
            })
            .collect()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn execute_job(&self, job: &BacktestJob) -> BacktestJobResult {
        let _span = span!(Level::DEBUG, "backtest_job", job_id = %job.job_id).entered();
        let start = Instant::now();

        let (report, error) = match self.runner.run(&job.prices, &job.strategy) {
            Ok(report) => (Some(report), None),
            Err(e) => {
                warn!(job_id = %job.job_id, error = %e, "Backtest job failed");
                (None, Some(e.to_string()))
            }
        };

        BacktestJobResult {
            job_id: job.job_id.clone(),
            symbol: job.symbol.clone(),
            strategy: job.strategy,
            report,
            error,
            execution_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::backtest::series::PriceSeries;
    use crate::backtest::signals::StrategyConfig;

    fn prices(n: usize) -> Arc<PriceSeries> {
        let Some(start) = NaiveDate::from_ymd_opt(2023, 1, 1) else {
            panic!("valid start date");
        };
        let closes = (0..n).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1);
        match PriceSeries::from_pairs(start.iter_days().zip(closes)) {
            Ok(s) => Arc::new(s),
            Err(e) => panic!("test series should be valid: {e}"),
        }
    }

    #[test]
    fn test_parallel_backtester_creation() {
        let backtester = ParallelBacktester::new(ParallelConfig::default());
        assert!(backtester.effective_thread_count() > 0);
    }

    #[test]
    fn test_empty_jobs_error() {
        let backtester = ParallelBacktester::new(ParallelConfig::default());
        let result = backtester.run_jobs(&[]);

        assert!(matches!(result, Err(ParallelError::NoJobs)));
    }

    #[test]
    fn test_failing_job_does_not_abort_others() {
        let series = prices(60);
        let strategies = [
            StrategyConfig::momentum(5),
            StrategyConfig::crossover(20, 5),
            StrategyConfig::crossover(5, 20),
            StrategyConfig::momentum(10),
        ];
        let jobs = BacktestJob::for_strategies("TEST", &series, &strategies);
        let backtester = ParallelBacktester::new(ParallelConfig {
            max_threads: 2,
            ..ParallelConfig::default()
        });

        let Ok(result) = backtester.run_jobs(&jobs) else {
            panic!("jobs should execute");
        };

        assert_eq!(result.jobs_executed, 4);
        assert_eq!(result.jobs_succeeded, 3);
        assert_eq!(result.jobs_failed, 1);
        assert_eq!(result.results[1].job_id, "TEST:ma_crossover(20,5)");
        assert!(result.results[1].error.is_some());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let series = prices(80);
        let jobs = BacktestJob::for_strategies(
            "TEST",
            &series,
            &[
                StrategyConfig::momentum(3),
                StrategyConfig::momentum(7),
                StrategyConfig::crossover(3, 10),
                StrategyConfig::crossover(5, 20),
            ],
        );

        let sequential = ParallelBacktester::new(ParallelConfig {
            min_parallel_jobs: usize::MAX,
            ..ParallelConfig::default()
        });
        let parallel = ParallelBacktester::new(ParallelConfig {
            min_parallel_jobs: 1,
            ..ParallelConfig::default()
        });

        let (Ok(a), Ok(b)) = (sequential.run_jobs(&jobs), parallel.run_jobs(&jobs)) else {
            panic!("jobs should execute");
        };

        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.job_id, y.job_id);
            assert_eq!(x.report, y.report);
        }
    }
}
