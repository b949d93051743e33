//! Cross-thread control flags and the exactly-once completion notifier.
//!
//! The controlling surface toggles flags; the render loop only ever reads
//! them. Nothing else crosses the thread boundary except the single
//! completion callback fired when a session reaches its end.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A clearable boolean signal shared across threads.
///
/// All accesses use `SeqCst`; the flags are polled at frame cadence, so
/// clarity wins over weaker orderings.
#[derive(Debug, Clone, Default)]
pub struct ControlSignal(Arc<AtomicBool>);

impl ControlSignal {
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The two signals a session polls every frame.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSignals {
    pub stop: ControlSignal,
    pub pause: ControlSignal,
}

impl PlaybackSignals {
    /// Request the session to end. Idempotent.
    pub fn signal_stop(&self) {
        self.stop.set();
    }

    /// Hold the current frame until resumed. Idempotent.
    pub fn signal_pause(&self) {
        self.pause.set();
    }

    /// Clear a pending pause. Idempotent.
    pub fn signal_resume(&self) {
        self.pause.clear();
    }
}

/// Fires a callback exactly once, with a `Drop` backstop so every exit
/// path from a session reports completion.
pub struct Completion {
    callback: Option<Box<dyn FnOnce() + Send>>,
}

impl Completion {
    pub fn new(callback: impl FnOnce() + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Invoke the callback if it has not fired yet.
    pub fn fire(&mut self) {
        if let Some(cb) = self.callback.take() {
            cb();
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.fire();
    }
}
