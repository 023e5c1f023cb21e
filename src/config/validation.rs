//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check every check is runnable (URL, verb, assertion input)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProbeConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProbeConfig;
use crate::probe::parse_verb;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("probe.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("check #{0} has an empty name")]
    EmptyName(usize),

    #[error("duplicate check name '{0}'")]
    DuplicateName(String),

    #[error("check '{name}': invalid target '{target}'")]
    InvalidTarget { name: String, target: String },

    #[error("check '{name}': unsupported verb '{verb}'")]
    InvalidVerb { name: String, verb: String },

    #[error("check '{0}': set either 'expected' or 'options', not both")]
    ConflictingAssertions(String),

    #[error("check '{name}': {reason}")]
    InvalidAssertions { name: String, reason: String },

    #[error("check '{0}': timeout_secs must be greater than zero")]
    ZeroCheckTimeout(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    for (index, check) in config.checks.iter().enumerate() {
        let name = check.name.clone();

        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyName(index));
        } else if !seen.insert(name.clone()) {
            errors.push(ValidationError::DuplicateName(name.clone()));
        }

        let target_ok = Url::parse(&check.target)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !target_ok {
            errors.push(ValidationError::InvalidTarget {
                name: name.clone(),
                target: check.target.clone(),
            });
        }

        if parse_verb(&check.verb).is_none() {
            errors.push(ValidationError::InvalidVerb {
                name: name.clone(),
                verb: check.verb.clone(),
            });
        }

        if check.expected.is_some() && check.options.is_some() {
            errors.push(ValidationError::ConflictingAssertions(name.clone()));
        } else if let Err(e) = check.assertion_input().parse() {
            errors.push(ValidationError::InvalidAssertions {
                name: name.clone(),
                reason: e.to_string(),
            });
        }

        if check.timeout_secs == Some(0) {
            errors.push(ValidationError::ZeroCheckTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
