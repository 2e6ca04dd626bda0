//! Error taxonomy for the backtest engine.
//!
//! Every engine component reports failures through [`BacktestError`]. Errors are
//! raised by the component that first observes the violation and propagated
//! unchanged by the runner; presentation is left to the caller.
//!
//! | Code | Raised by | Meaning |
//! |------|-----------|---------|
//! | `INVALID_CONFIG` | signal generation, aggregation | Bad strategy parameters or too little data |
//! | `INVALID_PRICE_SERIES` | `PriceSeries` construction | Unordered dates or non-positive closes |
//! | `MISALIGNED_SERIES` | return calculation | Price and signal series disagree on length or dates |
//! | `DEGENERATE_SERIES` | aggregation | Statistics undefined for the return series |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error codes for the backtest engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad strategy parameters or insufficient observations.
    InvalidConfig,
    /// Price series violates ordering or positivity.
    InvalidPriceSeries,
    /// Price and signal series are not aligned.
    MisalignedSeries,
    /// Statistics are undefined for the series.
    DegenerateSeries,
}

impl ErrorCode {
    /// Get the reason string for this code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InvalidPriceSeries => "INVALID_PRICE_SERIES",
            Self::MisalignedSeries => "MISALIGNED_SERIES",
            Self::DegenerateSeries => "DEGENERATE_SERIES",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Errors produced by the backtest engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BacktestError {
    /// Strategy or aggregation parameters are invalid.
    #[error("INVALID_CONFIG: {reason}")]
    InvalidConfig {
        /// What was wrong.
        reason: String,
    },

    /// Price observations cannot form a valid series.
    #[error("INVALID_PRICE_SERIES: {reason}")]
    InvalidPriceSeries {
        /// What was wrong.
        reason: String,
    },

    /// Price and signal series differ in length or dates.
    #[error("MISALIGNED_SERIES: {reason}")]
    MisalignedSeries {
        /// What was wrong.
        reason: String,
    },

    /// Statistics cannot be computed for the series.
    #[error("DEGENERATE_SERIES: {reason}")]
    DegenerateSeries {
        /// What was wrong.
        reason: String,
    },
}

impl BacktestError {
    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid price series error.
    pub fn invalid_price_series(reason: impl Into<String>) -> Self {
        Self::InvalidPriceSeries {
            reason: reason.into(),
        }
    }

    /// Create a misaligned series error.
    pub fn misaligned(reason: impl Into<String>) -> Self {
        Self::MisalignedSeries {
            reason: reason.into(),
        }
    }

    /// Create a degenerate series error.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSeries {
            reason: reason.into(),
        }
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::InvalidPriceSeries { .. } => ErrorCode::InvalidPriceSeries,
            Self::MisalignedSeries { .. } => ErrorCode::MisalignedSeries,
            Self::DegenerateSeries { .. } => ErrorCode::DegenerateSeries,
        }
    }

    /// Get the human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidConfig { reason }
            | Self::InvalidPriceSeries { reason }
            | Self::MisalignedSeries { reason }
            | Self::DegenerateSeries { reason } => reason,
        }
    }
}

/// Result alias for engine operations.
pub type BacktestResult<T> = Result<T, BacktestError>;
