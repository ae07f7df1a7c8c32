//! Async poll loop on tokio.
//!
//! Same ordering and failure rules as [`crate::blocking::poll_until`], with
//! `tokio::time::sleep` as the suspension point so the executor thread is
//! free while waiting.

use std::future::Future;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::{PollError, TimeoutError};
use crate::options::PollOptions;

/// Await `probe` until `predicate` accepts its result.
///
/// A [`CancelToken`](crate::CancelToken) is checked before each probe and
/// after each sleep; a sleep in progress is not interrupted.
pub async fn poll_until_async<R, E, F, Fut, P>(
    mut probe: F,
    mut predicate: P,
    options: &PollOptions,
) -> Result<R, PollError<R, E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    P: FnMut(&R) -> bool,
{
    let started = Instant::now();
    let mut attempts = 0u32;
    let mut last = None;

    loop {
        if options.is_cancelled() {
            return Err(PollError::Cancelled { attempts, last });
        }

        attempts += 1;
        let value = probe().await.map_err(PollError::Probe)?;

        if predicate(&value) {
            debug!(attempts, elapsed = ?started.elapsed(), "poll condition satisfied");
            return Ok(value);
        }

        let elapsed = started.elapsed();
        let Some(pause) = options.next_pause(elapsed) else {
            warn!(attempts, ?elapsed, timeout = ?options.timeout, "poll timed out");
            return Err(PollError::Timeout(TimeoutError {
                elapsed,
                attempts,
                last: Some(value),
            }));
        };
        last = Some(value);

        debug!(attempts, ?pause, "poll condition not met, sleeping");
        sleep(pause).await;
    }
}
