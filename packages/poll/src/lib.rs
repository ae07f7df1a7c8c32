//! # pluggy-poll
//!
//! Bounded polling for remote state that changes asynchronously.
//!
//! A poll loop repeatedly invokes a probe, checks a predicate against the
//! probe's result, and sleeps a fixed interval between attempts until the
//! predicate holds or the timeout elapses.
//!
//! ## Ordering
//!
//! ```text
//! probe -> predicate? -> done
//!            | no
//!            v
//!        deadline? -> Timeout
//!            | no
//!            v
//!        sleep(interval) -> probe ...
//! ```
//!
//! Each probe fully completes before the sleep starts. A probe error ends the
//! loop immediately; it is never retried.
//!
//! ## Blocking
//!
//! ```ignore
//! use pluggy_poll::{poll_until, PollOptions};
//!
//! let item = poll_until(
//!     || client.get_item(&id)?.into_result(),
//!     |item| item.status.is_finish_status(),
//!     &PollOptions::from_millis(500, 45_000),
//! )?;
//! ```
//!
//! ## Async
//!
//! With the `async` feature, [`poll_until_async`] does the same with
//! `tokio::time::sleep` as the suspension point.

pub mod blocking;
pub mod cancel;
pub mod error;
pub mod options;

#[cfg(feature = "async")]
pub mod async_poller;

pub use blocking::poll_until;
pub use cancel::CancelToken;
pub use error::{PollError, TimeoutError};
pub use options::PollOptions;

#[cfg(feature = "async")]
pub use async_poller::poll_until_async;
