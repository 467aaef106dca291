use std::cell::Cell;
use std::cmp::Ordering;

use super::algorithm::SortAlgorithm;
use super::control::RunControl;
use super::counter::OperationCounter;
use super::progress::{NoProgress, ProgressSink};
use crate::record::{Record, SortKey};

/// Quadratic algorithms publish progress every this many inner steps.
pub const PROGRESS_UPDATE_FREQUENCY: u64 = 50;
/// Insertion sort also publishes every this many outer iterations.
pub const INSERTION_OUTER_REPORT_INTERVAL: usize = 100;
/// Only every Nth completed merge advances the progress position.
pub const MERGE_PROGRESS_SAMPLE: u64 = 10;
/// Every Nth completed merge is pushed to the progress sink.
pub const MERGE_REPORT_SAMPLE: u64 = 100;

static NO_PROGRESS: NoProgress = NoProgress;

/// Instrumented in-place sorter for one run.
///
/// Every comparison goes through [`SortEngine::compare`] and is counted; every
/// element write counts as a swap (adjacent exchange for bubble sort, shift
/// for insertion sort, placement for merge sort). The engine checks its
/// [`RunControl`] at the start of each outer iteration or recursive call and
/// inside each inner loop. Once cancellation is seen no further swap is
/// performed, but the slice is left in whatever state it reached.
pub struct SortEngine<'a> {
    key: SortKey,
    counter: &'a OperationCounter,
    control: RunControl,
    progress: &'a dyn ProgressSink,
    merge_count: Cell<u64>,
}

impl<'a> SortEngine<'a> {
    pub fn new(key: SortKey, counter: &'a OperationCounter, control: RunControl) -> Self {
        Self {
            key,
            counter,
            control,
            progress: &NO_PROGRESS,
            merge_count: Cell::new(0),
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    pub fn cancel(&self) {
        self.control.cancel();
    }

    pub fn toggle_pause(&self) {
        self.control.toggle_pause();
    }

    pub fn is_cancelled(&self) -> bool {
        self.control.is_cancelled()
    }

    pub fn is_paused(&self) -> bool {
        self.control.is_paused()
    }

    /// Orders `a` against `b` on the active key. Counts one comparison.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        self.counter.record_comparison();
        a.cmp_by(b, self.key)
    }

    fn less(&self, a: &Record, b: &Record) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    pub fn sort(&self, algorithm: SortAlgorithm, records: &mut [Record]) {
        match algorithm {
            SortAlgorithm::Bubble => self.bubble_sort(records),
            SortAlgorithm::Insertion => self.insertion_sort(records),
            SortAlgorithm::Merge => self.merge_sort(records),
        }
    }

    pub fn bubble_sort(&self, records: &mut [Record]) {
        let n = records.len();
        if n <= 1 {
            return;
        }

        let algorithm = SortAlgorithm::Bubble;
        let total_ops = algorithm.estimated_operations(n);
        self.begin(algorithm, n, total_ops);

        let mut current_op: u64 = 0;
        for pass in 0..n - 1 {
            if !self.checkpoint() {
                break;
            }

            let mut swapped = false;
            for j in 0..n - pass - 1 {
                if self.control.is_cancelled() {
                    break;
                }
                current_op += 1;

                // Strict less keeps equal keys in input order.
                if self.less(&records[j + 1], &records[j]) {
                    records.swap(j, j + 1);
                    self.counter.record_swap();
                    swapped = true;
                }

                if current_op % PROGRESS_UPDATE_FREQUENCY == 0 {
                    self.counter.advance_to(current_op);
                    self.progress.update(algorithm.name(), self.counter);
                }
            }

            if !swapped {
                self.counter.advance_to(total_ops);
                break;
            }
        }

        self.end(algorithm);
    }

    pub fn insertion_sort(&self, records: &mut [Record]) {
        let n = records.len();
        if n <= 1 {
            return;
        }

        let algorithm = SortAlgorithm::Insertion;
        let total_ops = algorithm.estimated_operations(n);
        self.begin(algorithm, n, total_ops);

        let mut current_op: u64 = 0;
        for i in 1..n {
            if !self.checkpoint() {
                break;
            }

            // Scan back over the strictly greater prefix, counting one shift
            // per element passed, then move them all right by one.
            let mut j = i;
            while j > 0 && !self.control.is_cancelled() && self.less(&records[i], &records[j - 1])
            {
                self.counter.record_swap();
                j -= 1;
                current_op += 1;

                if current_op % PROGRESS_UPDATE_FREQUENCY == 0 {
                    self.counter.advance_to(current_op.min(total_ops));
                    self.progress.update(algorithm.name(), self.counter);
                }
            }
            if j < i {
                records[j..=i].rotate_right(1);
            }

            if i % INSERTION_OUTER_REPORT_INTERVAL == 0 {
                self.counter.advance_to(current_op.min(total_ops));
                self.progress.update(algorithm.name(), self.counter);
            }
        }

        self.end(algorithm);
    }

    pub fn merge_sort(&self, records: &mut [Record]) {
        let n = records.len();
        if n <= 1 {
            return;
        }

        let algorithm = SortAlgorithm::Merge;
        self.begin(algorithm, n, algorithm.estimated_operations(n));
        self.merge_count.set(0);

        self.merge_sort_range(records, 0, n - 1);

        self.end(algorithm);
    }

    /// Sorts the inclusive range `left..=right`.
    fn merge_sort_range(&self, records: &mut [Record], left: usize, right: usize) {
        if left >= right || self.control.is_cancelled() {
            return;
        }
        if !self.checkpoint() {
            return;
        }

        let mid = left + (right - left) / 2;
        self.merge_sort_range(records, left, mid);
        self.merge_sort_range(records, mid + 1, right);
        self.merge(records, left, mid, right);

        let merges = self.merge_count.get() + 1;
        self.merge_count.set(merges);
        if merges % MERGE_PROGRESS_SAMPLE == 0 {
            self.counter.increment();
            if merges % MERGE_REPORT_SAMPLE == 0 {
                self.progress.update(SortAlgorithm::Merge.name(), self.counter);
            }
        }
    }

    /// Merges the sorted runs `left..=mid` and `mid+1..=right` back into
    /// place. On cancellation the range is left partially overwritten.
    fn merge(&self, records: &mut [Record], left: usize, mid: usize, right: usize) {
        let mut scratch = records[left..=right].to_vec();
        let (left_run, right_run) = scratch.split_at_mut(mid - left + 1);

        let (mut i, mut j, mut k) = (0, 0, left);
        while i < left_run.len() && j < right_run.len() && !self.control.is_cancelled() {
            // Ties go to the left run.
            if self.less(&right_run[j], &left_run[i]) {
                records[k] = std::mem::take(&mut right_run[j]);
                j += 1;
            } else {
                records[k] = std::mem::take(&mut left_run[i]);
                i += 1;
            }
            k += 1;
            self.counter.record_swap();
        }

        while i < left_run.len() && !self.control.is_cancelled() {
            records[k] = std::mem::take(&mut left_run[i]);
            i += 1;
            k += 1;
            self.counter.record_swap();
        }

        while j < right_run.len() && !self.control.is_cancelled() {
            records[k] = std::mem::take(&mut right_run[j]);
            j += 1;
            k += 1;
            self.counter.record_swap();
        }
    }

    fn checkpoint(&self) -> bool {
        self.control.wait_while_paused()
    }

    fn begin(&self, algorithm: SortAlgorithm, n: usize, total_ops: u64) {
        self.counter.set_total(total_ops);
        self.counter.reset();
        log::debug!(
            "{} on {} records by {} (estimated {} operations)",
            algorithm,
            n,
            self.key,
            total_ops
        );
    }

    fn end(&self, algorithm: SortAlgorithm) {
        if self.control.is_cancelled() {
            log::info!(
                "{} cancelled after {} comparisons, {} swaps",
                algorithm,
                self.counter.comparisons(),
                self.counter.swaps()
            );
        }
        self.counter.finish();
        self.progress.finish(algorithm.name(), self.counter);
    }
}
