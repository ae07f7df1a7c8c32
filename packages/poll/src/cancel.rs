//! Cooperative cancellation for poll loops.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

struct Shared {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

/// A cloneable flag that stops a poll loop early.
///
/// All clones observe the same flag. A blocking poll loop sleeping on the
/// token wakes up as soon as [`CancelToken::cancel`] is called.
#[derive(Clone)]
pub struct CancelToken {
    shared: Arc<Shared>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                cancelled: Mutex::new(false),
                signal: Condvar::new(),
            }),
        }
    }

    pub fn cancel(&self) {
        let mut cancelled = self.shared.cancelled.lock().unwrap();
        *cancelled = true;
        self.shared.signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.shared.cancelled.lock().unwrap()
    }

    /// Sleep for up to `timeout`, returning early if cancelled.
    ///
    /// Returns `true` if the token was cancelled.
    pub fn sleep(&self, timeout: Duration) -> bool {
        let cancelled = self.shared.cancelled.lock().unwrap();
        let (cancelled, _) = self
            .shared
            .signal
            .wait_timeout_while(cancelled, timeout, |cancelled| !*cancelled)
            .unwrap();
        *cancelled
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
