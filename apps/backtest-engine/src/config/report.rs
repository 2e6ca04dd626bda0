//! Report output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

/// Where and how results are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory for per-job CSV and JSON files; nothing is written when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Console summary format.
    #[serde(default)]
    pub format: ReportFormat,
}
