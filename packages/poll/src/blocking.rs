//! Blocking poll loop.
//!
//! The calling thread sleeps between probes. Run it on a dedicated thread
//! (or `spawn_blocking`) when the caller lives inside an async runtime.

use std::thread;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{PollError, TimeoutError};
use crate::options::PollOptions;

/// Invoke `probe` until `predicate` accepts its result.
///
/// Returns the first accepted result. A probe error is returned as
/// [`PollError::Probe`] without sleeping or retrying. Once the elapsed time
/// reaches `options.timeout` after a rejected result, the loop fails with
/// [`PollError::Timeout`] carrying that result.
pub fn poll_until<R, E, F, P>(
    mut probe: F,
    mut predicate: P,
    options: &PollOptions,
) -> Result<R, PollError<R, E>>
where
    F: FnMut() -> Result<R, E>,
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
        let value = probe().map_err(PollError::Probe)?;

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
        match &options.cancel {
            Some(token) => {
                if token.sleep(pause) {
                    return Err(PollError::Cancelled { attempts, last });
                }
            }
            None => thread::sleep(pause),
        }
    }
}
