//! Configuration for parallel backtest execution.

use serde::{Deserialize, Serialize};

/// Configuration for parallel backtest execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Maximum number of threads to use (0 = rayon default).
    pub max_threads: usize,

    /// Minimum parallelization threshold (jobs below this run sequentially).
    pub min_parallel_jobs: usize,

    /// Whether to log per-job progress.
    pub track_progress: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            min_parallel_jobs: 4,
            track_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();

        assert_eq!(config.max_threads, 0);
        assert!(config.track_progress);
        assert_eq!(config.min_parallel_jobs, 4);
    }

    #[test]
    fn test_parallel_config_partial_yaml() {
        let config: ParallelConfig = match serde_yaml_bw::from_str("max_threads: 2\n") {
            Ok(c) => c,
            Err(e) => panic!("partial section should parse: {e}"),
        };
        assert_eq!(config.max_threads, 2);
        assert_eq!(config.min_parallel_jobs, 4);
    }
}
