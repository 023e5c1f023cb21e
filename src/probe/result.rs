//! Probe outcome and the internal error taxonomy behind it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assertion::{ComparisonError, ParseError};
use crate::probe::deadline::DeadlineError;

/// Everything that can make a probe fail.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Verb is not one of the supported methods. No request was sent.
    #[error("provided invalid command/http verb: {0}")]
    InvalidVerb(String),

    /// Target could not be turned into a request. No request was sent.
    #[error("encounted error while creating request: {0}")]
    InvalidTarget(String),

    /// Deadline fired before the probe finished.
    #[error("Timeout exceeded; err {0}")]
    Timeout(#[from] DeadlineError),

    /// DNS, connect, TLS or protocol failure.
    #[error("encounted error while making request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("encounted error while parsing expected output: {0}")]
    Parse(#[from] ParseError),

    #[error("encounted error while comparing expected output: {0}")]
    Compare(#[from] ComparisonError),

    /// The probe task panicked or was aborted.
    #[error("probe task failed: {0}")]
    Task(String),
}

impl ProbeError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::InvalidVerb(_) | ProbeError::InvalidTarget(_) => "config",
            ProbeError::Timeout(_) => "timeout",
            ProbeError::Request(_) => "transport",
            ProbeError::Parse(_) => "parse",
            ProbeError::Compare(_) => "mismatch",
            ProbeError::Task(_) => "task",
        }
    }

    /// Diagnostic reported to the caller.
    ///
    /// Failures detected before the request is issued, and timeouts, are
    /// reported as-is; everything observed by the request task is prefixed.
    pub fn message(&self) -> String {
        match self {
            ProbeError::InvalidVerb(_) | ProbeError::InvalidTarget(_) | ProbeError::Timeout(_) => {
                self.to_string()
            }
            _ => format!("Encountered error: {}", self),
        }
    }
}

/// Binary probe outcome plus diagnostic.
///
/// `message` is empty exactly when `success` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub success: bool,
    pub message: String,
}

impl ProbeResult {
    pub fn pass() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Tuple form `(success, message)`.
    pub fn into_parts(self) -> (bool, String) {
        (self.success, self.message)
    }
}

impl From<Result<(), ProbeError>> for ProbeResult {
    fn from(outcome: Result<(), ProbeError>) -> Self {
        match outcome {
            Ok(()) => ProbeResult::pass(),
            Err(err) => ProbeResult::fail(err.message()),
        }
    }
}
