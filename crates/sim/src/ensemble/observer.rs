//! Progress reporting and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives progress from an ensemble and may ask it to stop.
///
/// Observers are shared by every worker thread, so callbacks can arrive
/// concurrently and out of run order.
pub trait EnsembleObserver: Sync {
    /// Called after each run finishes. `completed` counts finished runs so
    /// far, `total` is the requested run count.
    fn on_run_complete(&self, _completed: usize, _total: usize) {}

    /// Polled before each run starts and at every sampling point inside a
    /// run. Returning `true` abandons all in-flight runs.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that ignores progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EnsembleObserver for NoopObserver {}

/// Shared flag for cancelling an ensemble from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl EnsembleObserver for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}
