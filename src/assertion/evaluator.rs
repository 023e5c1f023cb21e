//! Assertion evaluation against an HTTP response.
//!
//! # Check Order
//! 1. Status code (before the body is touched)
//! 2. Body read, exactly once
//! 3. Substring
//! 4. Exact match
//! 5. Regular expression
//!
//! The first failing check produces the error; later checks are skipped.

use regex::Regex;
use reqwest::Response;
use thiserror::Error;

use crate::assertion::types::AssertionSet;

/// A response that did not satisfy the assertion set, or could not be read.
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("status code mismatch: expected \"{expected}\", got \"{actual}\"")]
    StatusMismatch { expected: i64, actual: u16 },

    #[error("encountered error while reading response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("substring match mismatch: expected \"{0}\"")]
    SubstringMismatch(String),

    #[error("match mismatch: expected \"{expected}\", got \"{actual}\"")]
    ExactMismatch { expected: String, actual: String },

    #[error("invalid regex pattern: \"{0}\"")]
    InvalidPattern(String),

    #[error("regex match mismatch: expected \"{0}\"")]
    PatternMismatch(String),
}

impl AssertionSet {
    /// Evaluate every configured check against `response`, consuming its body.
    pub async fn compare(&self, response: Response) -> Result<(), ComparisonError> {
        let actual = response.status().as_u16();
        if let Some(expected) = self.expected_status {
            if expected != i64::from(actual) {
                return Err(ComparisonError::StatusMismatch { expected, actual });
            }
        }

        let bytes = response.bytes().await.map_err(ComparisonError::BodyRead)?;
        let body = String::from_utf8_lossy(&bytes);
        tracing::debug!(status = actual, body = %body, "Response body received");

        self.check_body(&body)
    }

    /// Run the body checks against already-buffered text.
    pub fn check_body(&self, body: &str) -> Result<(), ComparisonError> {
        if let Some(substring) = &self.substring {
            if !body.contains(substring.as_str()) {
                return Err(ComparisonError::SubstringMismatch(substring.clone()));
            }
        }

        if let Some(exact) = &self.exact {
            if exact != body {
                return Err(ComparisonError::ExactMismatch {
                    expected: exact.clone(),
                    actual: body.to_string(),
                });
            }
        }

        if let Some(pattern) = &self.pattern {
            let compiled =
                Regex::new(pattern).map_err(|_| ComparisonError::InvalidPattern(pattern.clone()))?;
            if !compiled.is_match(body) {
                return Err(ComparisonError::PatternMismatch(pattern.clone()));
            }
        }

        Ok(())
    }
}

/// Free-function form of [`AssertionSet::compare`].
pub async fn compare(set: &AssertionSet, response: Response) -> Result<(), ComparisonError> {
    set.compare(response).await
}
