mod common;
use common::test_dir_with_name;

use std::fs;

use sortbench::benchmark::{OutputVerifier, PermutationVerifier, find_fastest};
use sortbench::dataset::generate_records;
use sortbench::{
    BenchmarkConfig, BenchmarkError, BenchmarkRunner, InMemDataset, OperationCounter,
    ProgressSink, Record, RecordSource, RunControl, SortAlgorithm, SortKey, estimated_expensive,
};

fn runner_with(records: Vec<Record>, config: BenchmarkConfig) -> BenchmarkRunner {
    BenchmarkRunner::new(config, Box::new(InMemDataset::new(records)))
}

fn reversed(n: i64) -> Vec<Record> {
    (1..=n)
        .rev()
        .map(|id| Record::new(id, format!("F{:05}", id), format!("L{:05}", n - id)))
        .collect()
}

#[test]
fn test_run_one_three_records() {
    let data = vec![
        Record::new(3, "C", ""),
        Record::new(1, "A", ""),
        Record::new(2, "B", ""),
    ];
    let mut runner = runner_with(data, BenchmarkConfig::default());

    let result = runner
        .run_one(SortAlgorithm::Bubble, SortKey::Id, 3)
        .unwrap();

    assert_eq!(result.algorithm, SortAlgorithm::Bubble);
    assert_eq!(result.sort_key, SortKey::Id);
    assert_eq!(result.record_count, 3);
    assert_eq!(result.comparisons, 3);
    assert_eq!(result.swaps, 2);
    assert!(result.completed);
    assert!(!result.cancelled);
    assert_eq!(result.status(), "Complete");
    assert_eq!(result.total_time(), result.load_time + result.sort_time);

    assert_eq!(runner.history().len(), 1);
    assert_eq!(runner.history().last(), Some(&result));
}

#[test]
fn test_run_one_returns_sorted_records() {
    let mut runner = runner_with(generate_records(400, 9), BenchmarkConfig::default());
    let outcome = runner
        .run_one_with_records(SortAlgorithm::Merge, SortKey::LastName, 250)
        .unwrap();

    assert_eq!(outcome.records.len(), 250);
    assert_eq!(outcome.result.record_count, 250);
    for pair in outcome.records.windows(2) {
        assert!(pair[0].last_name <= pair[1].last_name);
    }
}

#[test]
fn test_source_is_never_mutated() {
    let data = reversed(100);
    let mut runner = runner_with(data.clone(), BenchmarkConfig::default());

    runner.run_one(SortAlgorithm::Insertion, SortKey::Id, 100).unwrap();
    // A second run on the same source sees the original order again.
    let second = runner.run_one(SortAlgorithm::Insertion, SortKey::Id, 100).unwrap();

    assert_eq!(second.swaps, 100 * 99 / 2);
    assert_eq!(runner.source().load(100), data);
}

#[test]
fn test_run_all_order_and_independence() {
    let mut runner = runner_with(reversed(300), BenchmarkConfig::default());
    let results = runner.run_all(SortKey::Id, 200).unwrap();

    let algorithms: Vec<_> = results.iter().map(|r| r.algorithm).collect();
    assert_eq!(algorithms, SortAlgorithm::ALL.to_vec());

    // Both quadratic sorts see the same reversed slice.
    assert_eq!(results[0].swaps, 200 * 199 / 2);
    assert_eq!(results[1].swaps, 200 * 199 / 2);
    assert!(results[2].comparisons < results[0].comparisons);
    assert!(results.iter().all(|r| r.completed && r.record_count == 200));

    assert_eq!(runner.history().len(), 3);
    assert_eq!(runner.history().results(), results.as_slice());
    assert!(find_fastest(&results).is_some());
}

#[test]
fn test_insufficient_records() {
    let mut runner = runner_with(generate_records(50, 1), BenchmarkConfig::default());
    let err = runner
        .run_one(SortAlgorithm::Merge, SortKey::Id, 51)
        .unwrap_err();

    match err {
        BenchmarkError::InsufficientRecords {
            requested,
            available,
        } => {
            assert_eq!(requested, 51);
            assert_eq!(available, 50);
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(runner.history().is_empty());
}

#[test]
fn test_zero_records_is_a_no_op() {
    let mut runner = runner_with(generate_records(10, 1), BenchmarkConfig::default());
    let result = runner.run_one(SortAlgorithm::Bubble, SortKey::FirstName, 0).unwrap();

    assert_eq!(result.record_count, 0);
    assert_eq!(result.comparisons, 0);
    assert_eq!(result.swaps, 0);
    assert!(result.completed);
}

/// Cancels through the runner's own control on the first progress update.
struct CancelOnUpdate {
    control: RunControl,
}

impl ProgressSink for CancelOnUpdate {
    fn update(&self, _label: &str, _counter: &OperationCounter) {
        self.control.cancel();
    }

    fn finish(&self, _label: &str, _counter: &OperationCounter) {}
}

#[test]
fn test_cancelled_run_is_recorded() {
    let config = BenchmarkConfig {
        show_progress: true,
        ..BenchmarkConfig::default()
    };
    let mut runner = runner_with(reversed(2000), config);
    let control = runner.control();
    runner.set_progress_sink(Box::new(CancelOnUpdate { control }));

    let result = runner.run_one(SortAlgorithm::Bubble, SortKey::Id, 2000).unwrap();
    assert!(!result.completed);
    assert!(result.cancelled);
    assert_eq!(result.status(), "Cancelled");
    assert!(result.swaps < 2000 * 1999 / 2);
    assert_eq!(runner.history().len(), 1);

    // The next run starts from a cleared control.
    let next = runner.run_one(SortAlgorithm::Merge, SortKey::Id, 10).unwrap();
    assert!(next.completed);
}

#[test]
fn test_cancel_before_run_stops_it_immediately() {
    let mut runner = runner_with(reversed(500), BenchmarkConfig::default());
    let data = runner.source().load(500);
    runner.control().cancel();

    let outcome = runner
        .run_one_with_records(SortAlgorithm::Bubble, SortKey::Id, 500)
        .unwrap();
    assert!(outcome.result.cancelled);
    assert!(!outcome.result.completed);
    assert_eq!(outcome.result.swaps, 0);
    assert_eq!(outcome.records, data);

    // The pending request is consumed by the run it stopped.
    assert!(!runner.control().is_cancelled());
    let next = runner.run_one(SortAlgorithm::Bubble, SortKey::Id, 500).unwrap();
    assert!(next.completed);
    assert_eq!(next.swaps, 500 * 499 / 2);
}

#[test]
fn test_cancel_between_runs_reaches_next_run() {
    let mut runner = runner_with(reversed(300), BenchmarkConfig::default());
    let first = runner.run_one(SortAlgorithm::Merge, SortKey::Id, 300).unwrap();
    assert!(first.completed);

    runner.control().cancel();
    let results = runner.run_all(SortKey::Id, 300).unwrap();

    assert!(results[0].cancelled);
    assert_eq!(results[0].swaps, 0);
    assert!(results[1].completed);
    assert!(results[2].completed);
}

#[test]
fn test_progress_sink_ignored_when_disabled() {
    let mut runner = runner_with(reversed(2000), BenchmarkConfig::default());
    let control = runner.control();
    runner.set_progress_sink(Box::new(CancelOnUpdate { control }));

    let result = runner.run_one(SortAlgorithm::Bubble, SortKey::Id, 2000).unwrap();
    assert!(result.completed);
}

#[test]
fn test_verification_passes() {
    let config = BenchmarkConfig {
        verify: true,
        ..BenchmarkConfig::default()
    };
    let mut runner = runner_with(generate_records(500, 17), config);
    runner.set_verifier(Box::new(PermutationVerifier::new_quiet()));

    for key in SortKey::ALL {
        let results = runner.run_all(key, 300).unwrap();
        assert!(results.iter().all(|r| r.completed));
    }
    assert_eq!(runner.history().len(), 9);
}

/// Rejects every output.
struct RejectAll;

impl OutputVerifier for RejectAll {
    fn verify(
        &self,
        _key: SortKey,
        _input: &[Record],
        _output: &[Record],
    ) -> Result<(), BenchmarkError> {
        Err(BenchmarkError::Verification {
            index: 0,
            reason: "rejected".to_string(),
        })
    }
}

#[test]
fn test_verification_failure_is_reported() {
    let config = BenchmarkConfig {
        verify: true,
        ..BenchmarkConfig::default()
    };
    let mut runner = runner_with(generate_records(20, 2), config);
    runner.set_verifier(Box::new(RejectAll));

    let err = runner.run_one(SortAlgorithm::Insertion, SortKey::Id, 20).unwrap_err();
    assert!(matches!(err, BenchmarkError::Verification { index: 0, .. }));
}

#[test]
fn test_run_log_is_appended() {
    let dir = test_dir_with_name("test_runs_run_log");
    let path = dir.join("benchmark.log");
    let _ = fs::remove_file(&path);

    let config = BenchmarkConfig {
        log_path: Some(path.clone()),
        ..BenchmarkConfig::default()
    };
    let mut runner = runner_with(generate_records(50, 5), config);
    runner.run_all(SortKey::FirstName, 50).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Algorithm: Bubble Sort"));
    assert!(contents.contains("Algorithm: Insertion Sort"));
    assert!(contents.contains("Algorithm: Merge Sort"));
    assert_eq!(contents.matches("Completed: Yes").count(), 3);
    assert_eq!(contents.matches("Records: 50").count(), 3);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_estimated_expensive() {
    assert!(!estimated_expensive(SortAlgorithm::Bubble, 10_000));
    assert!(estimated_expensive(SortAlgorithm::Bubble, 10_001));
    assert!(estimated_expensive(SortAlgorithm::Insertion, 100_000));
    assert!(!estimated_expensive(SortAlgorithm::Merge, 100_000));
}
