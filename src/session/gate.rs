use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// One-shot signal used by a program's main task to wait for its callback.
///
/// Only the first `signal()` counts. A `wait()` that starts after the signal
/// resolves immediately.
#[derive(Debug, Default)]
pub struct OneShotGate {
    signalled: AtomicBool,
    notify: Notify,
}

impl OneShotGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the gate. Returns `true` only for the call that opened it.
    pub fn signal(&self) -> bool {
        if self.signalled.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    pub fn is_signalled(&self) -> bool {
        self.signalled.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_signalled() {
                return;
            }
            notified.await;
        }
    }
}
