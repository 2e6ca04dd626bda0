// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::too_many_lines,
        clippy::needless_collect,
        clippy::items_after_statements
    )
)]

//! Backtest Engine - Rust Core Library
//!
//! Deterministic backtesting of rule-based strategies over daily closes.
//!
//! # Architecture
//!
//! A pure, synchronous engine surrounded by I/O collaborators:
//!
//! - **Engine** (`backtest`): price/signal/return series, strategies,
//!   return calculation, performance aggregation, the runner, look-ahead
//!   detection and Rayon fan-out over independent runs
//! - **Data** (`data`): Alpha Vantage daily prices over HTTP or from disk
//! - **Report** (`report`): console table, per-day CSV, JSON
//! - **Config** (`config`): YAML with environment interpolation
//!
//! The engine never performs I/O and never retries; collaborators report
//! their own failures.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Backtest engine: series, strategies, returns, metrics, runner.
pub mod backtest;

/// YAML configuration.
pub mod config;

/// Daily price data collaborator.
pub mod data;

/// Engine error taxonomy.
pub mod error;

/// Rendering collaborator.
pub mod report;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use backtest::{
    BacktestOutcome, BacktestRunner, PerformanceReport, PriceSeries, ReturnSeries, SignalGenerator,
    SignalSeries, StrategyConfig,
};
pub use error::{BacktestError, BacktestResult, ErrorCode};
