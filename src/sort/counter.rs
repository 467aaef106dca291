use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Operation counters for one sort invocation.
///
/// All counters are atomics so a display thread can read them while the
/// sort is running, and so increments from several threads never get lost.
/// `current`/`total` only drive the progress percentage; `comparisons` and
/// `swaps` are the reported benchmark metrics.
#[derive(Debug)]
pub struct OperationCounter {
    current: AtomicU64,
    total: AtomicU64,
    comparisons: AtomicU64,
    swaps: AtomicU64,
    start: Mutex<Instant>,
}

impl Default for OperationCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationCounter {
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
            total: AtomicU64::new(0),
            comparisons: AtomicU64::new(0),
            swaps: AtomicU64::new(0),
            start: Mutex::new(Instant::now()),
        }
    }

    /// Zeroes the counters and restarts the clock. `total` is left alone.
    pub fn reset(&self) {
        self.current.store(0, Ordering::Relaxed);
        self.comparisons.store(0, Ordering::Relaxed);
        self.swaps.store(0, Ordering::Relaxed);
        *self.start.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now();
    }

    /// Declares the expected number of operations for progress scaling.
    pub fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    pub fn record_comparison(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_swap(&self) {
        self.swaps.fetch_add(1, Ordering::Relaxed);
    }

    /// Moves the progress position forward to `position`. Never moves back.
    pub fn advance_to(&self, position: u64) {
        self.current.fetch_max(position, Ordering::Relaxed);
    }

    pub fn increment(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
    }

    /// Forces the progress position to `total`.
    pub fn finish(&self) {
        let total = self.total.load(Ordering::Relaxed);
        self.current.fetch_max(total, Ordering::Relaxed);
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    pub fn swaps(&self) -> u64 {
        self.swaps.load(Ordering::Relaxed)
    }

    pub fn elapsed_duration(&self) -> Duration {
        self.start.lock().unwrap_or_else(|e| e.into_inner()).elapsed()
    }

    /// Wall-clock seconds since the last `reset`, paused time included.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_duration().as_secs_f64()
    }

    /// Linear extrapolation of the remaining time, 0 before any progress.
    pub fn estimated_remaining(&self) -> f64 {
        let current = self.current();
        if current == 0 {
            return 0.0;
        }
        let remaining = self.total().saturating_sub(current);
        remaining as f64 * self.elapsed() / current as f64
    }

    /// Progress in percent, clamped to [0, 100]. 0 when no total is set.
    pub fn progress_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (100.0 * self.current() as f64 / total as f64).clamp(0.0, 100.0)
    }
}
