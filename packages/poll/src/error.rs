use std::time::Duration;

/// The poll deadline passed before the predicate was satisfied.
#[derive(thiserror::Error, Debug, Clone)]
#[error("poll timed out after {elapsed:?} ({attempts} attempts)")]
pub struct TimeoutError<R> {
    /// Wall-clock time since the first probe started.
    pub elapsed: Duration,
    /// Number of probes that ran.
    pub attempts: u32,
    /// Result of the last probe, if any probe ran.
    pub last: Option<R>,
}

/// Errors from a poll loop.
///
/// `R` is the probe's result type and `E` its error type.
#[derive(thiserror::Error, Debug)]
pub enum PollError<R, E> {
    #[error("{0}")]
    Timeout(TimeoutError<R>),

    #[error("poll cancelled after {attempts} attempts")]
    Cancelled { attempts: u32, last: Option<R> },

    #[error("probe failed: {0}")]
    Probe(E),
}

impl<R, E> PollError<R, E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PollError::Timeout(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PollError::Cancelled { .. })
    }

    /// The probe error, if the loop ended because a probe failed.
    pub fn into_probe_error(self) -> Option<E> {
        match self {
            PollError::Probe(e) => Some(e),
            _ => None,
        }
    }

    /// The last value the probe produced before the loop gave up.
    pub fn last(&self) -> Option<&R> {
        match self {
            PollError::Timeout(timeout) => timeout.last.as_ref(),
            PollError::Cancelled { last, .. } => last.as_ref(),
            PollError::Probe(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display() {
        let e: PollError<u32, String> = PollError::Timeout(TimeoutError {
            elapsed: Duration::from_millis(50),
            attempts: 6,
            last: Some(5),
        });
        let display = format!("{}", e);
        assert!(display.contains("timed out"));
        assert!(display.contains("6 attempts"));
        assert!(e.is_timeout());
        assert_eq!(e.last(), Some(&5));
    }

    #[test]
    fn probe_error_display_and_extraction() {
        let e: PollError<u32, String> = PollError::Probe("connection refused".to_string());
        assert_eq!(format!("{}", e), "probe failed: connection refused");
        assert!(e.last().is_none());
        assert_eq!(e.into_probe_error(), Some("connection refused".to_string()));
    }

    #[test]
    fn cancelled_keeps_last_value() {
        let e: PollError<&str, String> = PollError::Cancelled {
            attempts: 2,
            last: Some("UPDATING"),
        };
        assert!(e.is_cancelled());
        assert!(!e.is_timeout());
        assert_eq!(e.last(), Some(&"UPDATING"));
        assert!(e.into_probe_error().is_none());
    }
}
