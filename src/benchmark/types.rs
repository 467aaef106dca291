use std::path::PathBuf;
use std::time::Duration;

use crate::record::SortKey;
use crate::sort::SortAlgorithm;

/// Default number of sorted records shown after a single run.
pub const DISPLAY_RECORDS: usize = 10;
pub const DEFAULT_LOG_PATH: &str = "logs/benchmark.log";
/// Record counts offered by the CLI presets.
pub const RECORD_PRESETS: [usize; 3] = [1_000, 10_000, 100_000];

/// Summary of one algorithm run. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    pub algorithm: SortAlgorithm,
    pub sort_key: SortKey,
    pub record_count: usize,
    pub load_time: Duration,
    pub sort_time: Duration,
    pub comparisons: u64,
    pub swaps: u64,
    /// The algorithm ran to its end without observing cancellation.
    pub completed: bool,
    /// Cancellation was observed during the run.
    pub cancelled: bool,
}

impl RunResult {
    pub fn total_time(&self) -> Duration {
        self.load_time + self.sort_time
    }

    pub fn status(&self) -> &'static str {
        if self.completed { "Complete" } else { "Cancelled" }
    }
}

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    /// Check sortedness (and permutation) after every completed run.
    pub verify: bool,
    pub show_progress: bool,
    /// Append a text block per run to this file.
    pub log_path: Option<PathBuf>,
    pub display_records: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            verify: false,
            show_progress: false,
            log_path: None,
            display_records: DISPLAY_RECORDS,
        }
    }
}
