//! Parallel backtesting using Rayon.
//!
//! Runs many independent backtests, typically every configured strategy over
//! every fetched symbol. Jobs share price series through `Arc`, and each job
//! owns its outputs, so workers need no locks.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use backtest_engine::backtest::parallel::{BacktestJob, ParallelBacktester, ParallelConfig};
//! use backtest_engine::backtest::signals::StrategyConfig;
//!
//! let prices = Arc::new(prices);
//! let jobs = BacktestJob::for_strategies("SPY", &prices, &StrategyConfig::defaults());
//! let result = ParallelBacktester::new(ParallelConfig::default()).run_jobs(&jobs)?;
//! let best = result.best_by_sharpe();
//! ```

mod config;
mod error;
mod executor;
mod progress;
mod result;
mod types;

pub use config::ParallelConfig;
pub use error::ParallelError;
pub use executor::ParallelBacktester;
pub use progress::{Progress, ProgressTracker};
pub use result::ParallelResult;
pub use types::{BacktestJob, BacktestJobResult};
