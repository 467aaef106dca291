pub mod controls;
pub mod history;
pub mod reporting;
pub mod runner;
pub mod types;
pub mod verification;

pub use controls::{ControlCommand, parse_command, print_controls, spawn_key_watcher};
pub use history::{ResultHistory, RunLog};
pub use reporting::{
    ConsoleProgressBar, find_fastest, format_log_entry, format_seconds, print_algorithm_info,
    print_comparison_table, print_history, print_records_sample, print_run_metrics,
    results_to_csv,
};
pub use runner::{BenchmarkRunner, RunOutcome};
pub use types::{BenchmarkConfig, DEFAULT_LOG_PATH, DISPLAY_RECORDS, RECORD_PRESETS, RunResult};
pub use verification::{OutputVerifier, PermutationVerifier, SimpleVerifier};
