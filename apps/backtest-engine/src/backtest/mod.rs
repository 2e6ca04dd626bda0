//! Rule-based strategy backtesting over daily closes.
//!
//! The engine is a pipeline of pure, synchronous stages:
//!
//! - **Series**: validated, date-ordered price, signal and return series
//! - **Signals**: [`SignalGenerator`] strategies mapping prices to positions
//! - **Returns**: period market returns and lagged strategy returns
//! - **Metrics**: cumulative return, annualized Sharpe ratio, equity curve
//! - **Runner**: one pass through all of the above
//!
//! Look-ahead detection and a Rayon fan-out over many independent runs sit on
//! top of the runner.
//!
//! # Example
//!
//! ```ignore
//! use backtest_engine::backtest::{BacktestRunner, PriceSeries, StrategyConfig};
//!
//! let prices = PriceSeries::from_pairs(observations)?;
//! let report = BacktestRunner::default().run(&prices, &StrategyConfig::momentum(5))?;
//! println!("sharpe {:.2}", report.sharpe_ratio);
//! ```

pub mod indicators;
pub mod look_ahead;
pub mod metrics;
pub mod parallel;
pub mod returns;
pub mod runner;
pub mod series;
pub mod signals;

pub use look_ahead::{LookAheadChecker, LookAheadSummary, LookAheadViolation};
pub use metrics::{PerformanceAggregator, PerformanceReport, aggregate};
pub use parallel::{
    BacktestJob, BacktestJobResult, ParallelBacktester, ParallelConfig, ParallelError,
    ParallelResult,
};
pub use runner::{BacktestOutcome, BacktestRunner};
pub use series::{
    Position, PricePoint, PriceSeries, ReturnPoint, ReturnSeries, SignalPoint, SignalSeries,
};
pub use signals::{
    Momentum, MovingAverageCrossover, SignalGenerator, StrategyConfig, generate,
};
