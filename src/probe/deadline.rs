//! Deadlines bounding how long a caller waits for a probe.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

/// Why a deadline fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeadlineError {
    #[error("deadline has elapsed")]
    Elapsed,

    #[error("probe cancelled")]
    Cancelled,
}

/// Bound on a probe: relative timeout, absolute instant, or external token.
#[derive(Debug, Clone)]
pub enum Deadline {
    After(Duration),
    At(Instant),
    Token(CancellationToken),
}

impl Deadline {
    /// Resolve once the deadline fires.
    pub async fn expired(self) -> DeadlineError {
        match self {
            Deadline::After(timeout) => {
                time::sleep(timeout).await;
                DeadlineError::Elapsed
            }
            Deadline::At(instant) => {
                time::sleep_until(instant).await;
                DeadlineError::Elapsed
            }
            Deadline::Token(token) => {
                token.cancelled().await;
                DeadlineError::Cancelled
            }
        }
    }
}

impl From<Duration> for Deadline {
    fn from(timeout: Duration) -> Self {
        Deadline::After(timeout)
    }
}

impl From<Instant> for Deadline {
    fn from(instant: Instant) -> Self {
        Deadline::At(instant)
    }
}

impl From<CancellationToken> for Deadline {
    fn from(token: CancellationToken) -> Self {
        Deadline::Token(token)
    }
}
