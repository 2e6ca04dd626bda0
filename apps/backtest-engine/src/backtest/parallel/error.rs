//! Error types for parallel backtesting operations.

use thiserror::Error;

/// Errors from parallel backtesting operations.
///
/// Individual job failures are reported per job and never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// Thread pool initialization failed.
    #[error("Failed to initialize thread pool: {message}")]
    ThreadPoolError {
        /// Error message.
        message: String,
    },

    /// No jobs to execute.
    #[error("No backtest jobs provided")]
    NoJobs,
}
