use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

use super::history::ResultHistory;
use super::types::{RECORD_PRESETS, RunResult};
use crate::record::{Record, SortKey};
use crate::sort::{OperationCounter, ProgressSink, SortAlgorithm};

const PROGRESS_FILL: char = '=';
const PROGRESS_HEAD: char = '>';
const PROGRESS_EMPTY: char = '-';
/// ETA is hidden when it would exceed an hour.
const MAX_ETA_SECONDS: f64 = 3600.0;

pub fn format_seconds(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}

/// Print the metrics block for a single run
pub fn print_run_metrics(result: &RunResult) {
    println!("{}", "-".repeat(70));
    println!("PERFORMANCE METRICS:");
    println!("{}", "-".repeat(70));
    println!("Algorithm:     {}", result.algorithm);
    println!("Column:        {}", result.sort_key);
    println!("Records:       {}", result.record_count);
    println!("Load Time:     {}", format_seconds(result.load_time));
    println!("Sort Time:     {}", format_seconds(result.sort_time));
    println!("Total Time:    {}", format_seconds(result.total_time()));
    println!("Comparisons:   {}", result.comparisons);
    println!("Swaps:         {}", result.swaps);
    println!("Status:        {}", result.status());
    println!("{}", "-".repeat(70));
}

/// Print the first `limit` records as a table
pub fn print_records_sample(records: &[Record], key: SortKey, limit: usize) {
    let shown = limit.min(records.len());
    println!("\nFirst {} records (sorted by {}):", shown, key);
    println!("{}", "-".repeat(70));
    println!("{:<8} {:<25} {:<25}", "ID", "First Name", "Last Name");
    println!("{}", "-".repeat(70));
    for record in records.iter().take(shown) {
        println!(
            "{:<8} {:<25} {:<25}",
            record.id, record.first_name, record.last_name
        );
    }
    println!("{}", "-".repeat(70));
}

/// Print the side-by-side table for a comparison benchmark
pub fn print_comparison_table(results: &[RunResult]) {
    let Some(first) = results.first() else {
        return;
    };

    println!("\n{}", "=".repeat(80));
    println!("BENCHMARK COMPARISON RESULTS");
    println!("{}", "=".repeat(80));
    println!(
        "Dataset: {} records, sorted by {}",
        first.record_count, first.sort_key
    );
    println!("{}", "-".repeat(80));
    println!(
        "{:<16} {:<12} {:<12} {:<12} {:<15} {:<12} {:<10}",
        "Algorithm", "Load Time", "Sort Time", "Total Time", "Comparisons", "Swaps", "Status"
    );
    println!("{}", "-".repeat(80));

    for result in results {
        println!(
            "{:<16} {:<12} {:<12} {:<12} {:<15} {:<12} {:<10}",
            result.algorithm.name(),
            format_seconds(result.load_time),
            format_seconds(result.sort_time),
            format_seconds(result.total_time()),
            result.comparisons,
            result.swaps,
            result.status(),
        );
    }
    println!("{}", "-".repeat(80));

    if let Some(fastest) = find_fastest(results) {
        println!(
            "Fastest: {} ({})",
            fastest.algorithm,
            format_seconds(fastest.sort_time)
        );
    }
}

/// Print every run recorded so far
pub fn print_history(history: &ResultHistory) {
    if history.is_empty() {
        println!("No benchmark history available.");
        println!("Run a benchmark first to see results here.");
        return;
    }

    println!("\nTotal Benchmarks: {}", history.len());
    println!("{}", "-".repeat(70));
    println!(
        "{:<4} {:<16} {:<12} {:<10} {:<12} {:<10}",
        "#", "Algorithm", "Column", "Records", "Sort Time", "Status"
    );
    println!("{}", "-".repeat(70));
    for (i, result) in history.iter().enumerate() {
        println!(
            "{:<4} {:<16} {:<12} {:<10} {:<12} {:<10}",
            i + 1,
            result.algorithm.name(),
            result.sort_key.name(),
            result.record_count,
            format_seconds(result.sort_time),
            result.status(),
        );
    }
    println!("{}", "-".repeat(70));
}

pub fn print_algorithm_info() {
    println!("\n{}", "=".repeat(70));
    println!("ALGORITHM INFORMATION");
    println!("{}", "=".repeat(70));
    for algorithm in SortAlgorithm::ALL {
        let (best, space, best_for) = match algorithm {
            SortAlgorithm::Bubble => (
                "O(n) on already sorted input",
                "O(1) in-place",
                "Tiny datasets, teaching",
            ),
            SortAlgorithm::Insertion => (
                "O(n) on nearly sorted input",
                "O(1) in-place",
                "Small or nearly sorted datasets",
            ),
            SortAlgorithm::Merge => (
                "O(n log n) in every case",
                "O(n) auxiliary",
                "Large datasets",
            ),
        };
        println!("\n{}:", algorithm.name().to_uppercase());
        println!("  Time complexity:  {} worst/average, {}", algorithm.complexity(), best);
        println!("  Space complexity: {}", space);
        println!("  Stability:        Stable");
        println!("  Best for:         {}", best_for);
    }
    let presets: Vec<String> = RECORD_PRESETS.iter().map(|n| n.to_string()).collect();
    println!("\nSuggested record counts: {}", presets.join(", "));
    println!();
}

/// Text block appended to the run log
pub fn format_log_entry(result: &RunResult, timestamp_secs: u64) -> String {
    let mut entry = String::new();
    let _ = writeln!(entry, "========================================");
    let _ = writeln!(entry, "Timestamp: {}", timestamp_secs);
    let _ = writeln!(entry, "Algorithm: {}", result.algorithm);
    let _ = writeln!(entry, "Column: {}", result.sort_key);
    let _ = writeln!(entry, "Records: {}", result.record_count);
    let _ = writeln!(entry, "Load Time: {}", format_seconds(result.load_time));
    let _ = writeln!(entry, "Sort Time: {}", format_seconds(result.sort_time));
    let _ = writeln!(entry, "Total Time: {}", format_seconds(result.total_time()));
    let _ = writeln!(entry, "Comparisons: {}", result.comparisons);
    let _ = writeln!(entry, "Swaps: {}", result.swaps);
    let _ = writeln!(
        entry,
        "Completed: {}",
        if result.completed { "Yes" } else { "No" }
    );
    let _ = writeln!(entry, "========================================\n");
    entry
}

/// Generate a CSV format of the run results
pub fn results_to_csv(results: &[RunResult]) -> String {
    let mut csv = String::new();
    let _ = writeln!(
        csv,
        "algorithm,sort_key,records,load_time_s,sort_time_s,total_time_s,comparisons,swaps,completed,cancelled"
    );
    for result in results {
        let _ = writeln!(
            csv,
            "{},{},{},{:.6},{:.6},{:.6},{},{},{},{}",
            result.algorithm.name(),
            result.sort_key.name(),
            result.record_count,
            result.load_time.as_secs_f64(),
            result.sort_time.as_secs_f64(),
            result.total_time().as_secs_f64(),
            result.comparisons,
            result.swaps,
            result.completed,
            result.cancelled
        );
    }
    csv
}

/// Fastest completed run by sort time
pub fn find_fastest(results: &[RunResult]) -> Option<&RunResult> {
    results
        .iter()
        .filter(|r| r.completed)
        .min_by_key(|r| r.sort_time)
}

/// Progress bar drawn on stderr with carriage-return redraws.
pub struct ConsoleProgressBar {
    width: usize,
}

impl ConsoleProgressBar {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render(&self, label: &str, counter: &OperationCounter) -> String {
        let progress = counter.progress_percent();
        let filled = ((self.width as f64) * progress / 100.0) as usize;

        let mut bar = String::with_capacity(self.width);
        for i in 0..self.width {
            if i < filled {
                bar.push(PROGRESS_FILL);
            } else if i == filled && progress < 100.0 {
                bar.push(PROGRESS_HEAD);
            } else {
                bar.push(PROGRESS_EMPTY);
            }
        }

        let mut line = format!(
            "\r  {:<18} [{}] {:>6.1}%  {:.2}s",
            label,
            bar,
            progress,
            counter.elapsed()
        );
        if progress > 0.1 && progress < 99.9 {
            let eta = counter.estimated_remaining();
            if eta < MAX_ETA_SECONDS {
                let _ = write!(line, "  ETA: {:.1}s", eta);
            }
        }
        line
    }
}

impl Default for ConsoleProgressBar {
    fn default() -> Self {
        Self::new(50)
    }
}

impl ProgressSink for ConsoleProgressBar {
    fn update(&self, label: &str, counter: &OperationCounter) {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "{}", self.render(label, counter));
        let _ = stderr.flush();
    }

    fn finish(&self, label: &str, counter: &OperationCounter) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", self.render(label, counter));
    }
}
