//! Pre-run validation switches.

use serde::{Deserialize, Serialize};

/// Checks run before backtesting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Verify every strategy against look-ahead bias on each fetched series.
    #[serde(default)]
    pub look_ahead_check: bool,
}
