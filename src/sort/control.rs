use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// How long a paused sort sleeps between re-checks when no wakeup arrives.
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
struct ControlState {
    cancelled: AtomicBool,
    paused: AtomicBool,
    lock: Mutex<()>,
    wakeup: Condvar,
}

/// Cancel/pause token shared between a running sort and whoever drives it.
///
/// Clones share the same flags. The sort polls the token at its check
/// points; nothing is ever interrupted forcibly.
#[derive(Clone, Debug, Default)]
pub struct RunControl {
    state: Arc<ControlState>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Terminal until `reset`.
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.notify();
    }

    pub fn toggle_pause(&self) {
        self.state.paused.fetch_xor(true, Ordering::SeqCst);
        self.notify();
    }

    pub fn resume(&self) {
        self.state.paused.store(false, Ordering::SeqCst);
        self.notify();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused.load(Ordering::SeqCst)
    }

    /// Clears both flags so the token can drive the next run.
    pub fn reset(&self) {
        self.state.cancelled.store(false, Ordering::SeqCst);
        self.state.paused.store(false, Ordering::SeqCst);
        self.notify();
    }

    /// Blocks while paused. Returns `false` if the run is cancelled, either
    /// before or during the wait.
    pub fn wait_while_paused(&self) -> bool {
        if !self.is_paused() {
            return !self.is_cancelled();
        }

        log::info!("Run paused");
        let mut guard = self.state.lock.lock().unwrap_or_else(|e| e.into_inner());
        while self.is_paused() && !self.is_cancelled() {
            guard = match self.state.wakeup.wait_timeout(guard, PAUSE_POLL_INTERVAL) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        drop(guard);

        if self.is_cancelled() {
            false
        } else {
            log::info!("Run resumed");
            true
        }
    }

    fn notify(&self) {
        // Taking the lock orders the flag store before a waiter re-checks it.
        let _guard = self.state.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.state.wakeup.notify_all();
    }
}
