use std::time::Duration;

use crate::cancel::CancelToken;

/// Interval, deadline and optional cancellation for a poll loop.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Fixed pause between the end of one probe and the start of the next.
    pub interval: Duration,
    /// Total wall-clock budget, measured from the first probe.
    pub timeout: Duration,
    /// Checked before every probe and during every sleep.
    pub cancel: Option<CancelToken>,
}

impl PollOptions {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            timeout,
            cancel: None,
        }
    }

    pub fn from_millis(interval_ms: u64, timeout_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(interval_ms),
            Duration::from_millis(timeout_ms),
        )
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// How long to sleep after a miss at `elapsed`, or `None` once the
    /// deadline has passed.
    pub(crate) fn next_pause(&self, elapsed: Duration) -> Option<Duration> {
        if elapsed >= self.timeout {
            return None;
        }
        Some(self.interval.min(self.timeout - elapsed))
    }
}
