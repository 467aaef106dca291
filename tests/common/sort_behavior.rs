#![allow(dead_code)]

use std::cell::RefCell;
use std::cmp::Ordering;
use std::thread;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use sortbench::dataset::generate_records;
use sortbench::{
    OperationCounter, ProgressSink, Record, RunControl, SortAlgorithm, SortEngine, SortKey,
};

use super::{ids, records};

pub fn sort_with(algorithm: SortAlgorithm, key: SortKey, data: &mut [Record]) -> OperationCounter {
    let counter = OperationCounter::new();
    let engine = SortEngine::new(key, &counter, RunControl::new());
    engine.sort(algorithm, data);
    counter
}

fn assert_sorted(key: SortKey, data: &[Record]) {
    for pair in data.windows(2) {
        assert_ne!(
            pair[0].cmp_by(&pair[1], key),
            Ordering::Greater,
            "{} out of order: {} before {}",
            key,
            pair[0],
            pair[1]
        );
    }
}

/// `[(3,C),(1,A),(2,B)]` by id, with the per-algorithm swap count.
pub fn three_record_scenario(algorithm: SortAlgorithm, expected_swaps: u64) {
    let mut data = records(&[(3, "C"), (1, "A"), (2, "B")]);
    let counter = sort_with(algorithm, SortKey::Id, &mut data);

    assert_eq!(data, records(&[(1, "A"), (2, "B"), (3, "C")]));
    assert!(counter.comparisons() >= 2);
    assert_eq!(counter.swaps(), expected_swaps);
}

pub fn sorts_by_every_key(algorithm: SortAlgorithm) {
    for key in SortKey::ALL {
        let mut data = generate_records(300, 11);
        sort_with(algorithm, key, &mut data);
        assert_sorted(key, &data);
    }
}

/// Equal keys must keep their input order. The last name carries the input
/// position.
pub fn stable_on_equal_keys(algorithm: SortAlgorithm) {
    let names = ["Mia", "Ann", "Zed", "Ann", "Bo", "Mia", "Ann", "Zed", "Bo", "Ann"];
    let mut data: Vec<Record> = (0..200)
        .map(|i| Record::new(1000 - i as i64, names[i % names.len()], format!("{:04}", i)))
        .collect();
    let mut rng = StdRng::seed_from_u64(5);
    data.shuffle(&mut rng);
    let input = data.clone();

    sort_with(algorithm, SortKey::FirstName, &mut data);

    let mut expected = input.clone();
    expected.sort_by(|a, b| a.cmp_by(b, SortKey::FirstName));
    assert_eq!(data, expected);
}

pub fn output_is_permutation(algorithm: SortAlgorithm) {
    let mut data = generate_records(257, 3);
    // Exact duplicates must survive as duplicates.
    let duplicates = data[..20].to_vec();
    data.extend_from_slice(&duplicates);
    let mut input = data.clone();

    sort_with(algorithm, SortKey::LastName, &mut data);

    let total_order = |a: &Record, b: &Record| {
        a.id.cmp(&b.id)
            .then_with(|| a.first_name.cmp(&b.first_name))
            .then_with(|| a.last_name.cmp(&b.last_name))
    };
    let mut output = data.clone();
    input.sort_by(total_order);
    output.sort_by(total_order);
    assert_eq!(input, output);
}

pub fn degenerate_inputs(algorithm: SortAlgorithm) {
    let mut empty: Vec<Record> = Vec::new();
    let counter = sort_with(algorithm, SortKey::Id, &mut empty);
    assert!(empty.is_empty());
    assert_eq!(counter.comparisons(), 0);
    assert_eq!(counter.swaps(), 0);

    let mut single = records(&[(9, "Solo")]);
    let counter = sort_with(algorithm, SortKey::FirstName, &mut single);
    assert_eq!(single, records(&[(9, "Solo")]));
    assert_eq!(counter.comparisons(), 0);
    assert_eq!(counter.swaps(), 0);
}

pub fn cancelled_before_start(algorithm: SortAlgorithm) {
    let mut data = generate_records(100, 8);
    let original = data.clone();

    let counter = OperationCounter::new();
    let control = RunControl::new();
    control.cancel();
    let engine = SortEngine::new(SortKey::Id, &counter, control);
    engine.sort(algorithm, &mut data);

    assert!(engine.is_cancelled());
    assert_eq!(counter.swaps(), 0);
    assert_eq!(data, original);
}

/// Sink that snapshots the metric counters on every update.
#[derive(Default)]
pub struct RecordingSink {
    pub snapshots: RefCell<Vec<(u64, u64, u64)>>,
    pub finished: RefCell<u32>,
}

impl ProgressSink for RecordingSink {
    fn update(&self, _label: &str, counter: &OperationCounter) {
        self.snapshots
            .borrow_mut()
            .push((counter.comparisons(), counter.swaps(), counter.current()));
    }

    fn finish(&self, _label: &str, counter: &OperationCounter) {
        assert_eq!(counter.progress_percent(), 100.0);
        *self.finished.borrow_mut() += 1;
    }
}

pub fn counters_never_decrease(algorithm: SortAlgorithm) {
    let mut data: Vec<Record> = (1..=2000)
        .rev()
        .map(|id| Record::new(id, "N", ""))
        .collect();

    let counter = OperationCounter::new();
    let sink = RecordingSink::default();
    let engine = SortEngine::new(SortKey::Id, &counter, RunControl::new()).with_progress(&sink);
    engine.sort(algorithm, &mut data);

    let snapshots = sink.snapshots.borrow();
    assert!(!snapshots.is_empty(), "no progress updates were published");
    for pair in snapshots.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
        assert!(pair[0].1 <= pair[1].1);
        assert!(pair[0].2 <= pair[1].2);
    }
    assert_eq!(*sink.finished.borrow(), 1);
    assert_eq!(counter.current(), counter.total());
    assert_eq!(ids(&data), (1..=2000).collect::<Vec<_>>());
}

/// Sink that cancels the run on its first update.
pub struct CancellingSink {
    pub control: RunControl,
}

impl ProgressSink for CancellingSink {
    fn update(&self, _label: &str, _counter: &OperationCounter) {
        self.control.cancel();
    }

    fn finish(&self, _label: &str, _counter: &OperationCounter) {}
}

pub fn cancel_mid_run_stops_early(algorithm: SortAlgorithm) {
    let make_data = || -> Vec<Record> {
        (1..=3000)
            .rev()
            .map(|id| Record::new(id, "N", ""))
            .collect()
    };

    let mut full = make_data();
    let full_counter = sort_with(algorithm, SortKey::Id, &mut full);

    let mut data = make_data();
    let counter = OperationCounter::new();
    let control = RunControl::new();
    let sink = CancellingSink {
        control: control.clone(),
    };
    let engine = SortEngine::new(SortKey::Id, &counter, control.clone()).with_progress(&sink);
    engine.sort(algorithm, &mut data);

    assert!(control.is_cancelled());
    assert!(counter.swaps() < full_counter.swaps());
    assert!(counter.comparisons() < full_counter.comparisons());
}

pub fn pause_then_resume(algorithm: SortAlgorithm) {
    let mut data = generate_records(200, 21);
    let counter = OperationCounter::new();
    let control = RunControl::new();
    control.toggle_pause();

    let remote = control.clone();
    let resumer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(150));
        remote.toggle_pause();
    });

    let start = Instant::now();
    let engine = SortEngine::new(SortKey::Id, &counter, control.clone());
    engine.sort(algorithm, &mut data);
    resumer.join().unwrap();

    assert!(start.elapsed() >= Duration::from_millis(140));
    // Paused time is part of the measured run.
    assert!(counter.elapsed() >= 0.14);
    assert!(!control.is_cancelled());
    assert_sorted(SortKey::Id, &data);
}

pub fn cancel_while_paused(algorithm: SortAlgorithm) {
    let mut data = generate_records(200, 4);
    let original = data.clone();
    let counter = OperationCounter::new();
    let control = RunControl::new();
    control.toggle_pause();

    let remote = control.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        remote.cancel();
    });

    let engine = SortEngine::new(SortKey::Id, &counter, control.clone());
    engine.sort(algorithm, &mut data);
    canceller.join().unwrap();

    assert!(control.is_cancelled());
    assert_eq!(counter.swaps(), 0);
    assert_eq!(data, original);
}
