//! Normalized assertion types shared by both grammars.

use std::fmt;

use thiserror::Error;

use crate::assertion::flags::{FlagParser, FlagSpec};
use crate::assertion::inline::InlineParser;
use crate::assertion::{EXACT_MATCH, REGEX_MATCH, STATUS_CODE, SUBSTRING_MATCH};

/// Errors produced while turning assertion input into an [`AssertionSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A segment of the inline grammar had no `=`.
    #[error("invalid parameter string: {0}")]
    InvalidSegment(String),

    /// The status code could not be read as a base-10 integer.
    #[error("invalid status code: {0}")]
    InvalidStatusCode(String),
}

/// The set of checks applied to a single response.
///
/// Every field is optional. An unset field is never evaluated, so the
/// default set only verifies that a response arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertionSet {
    /// Expected HTTP status code. Any integer is accepted; one no server
    /// can send simply never matches.
    pub expected_status: Option<i64>,

    /// Text the body must contain.
    pub substring: Option<String>,

    /// Text the body must equal.
    pub exact: Option<String>,

    /// Regular expression the body must match somewhere.
    pub pattern: Option<String>,
}

impl AssertionSet {
    /// Returns true if no check is configured.
    pub fn is_empty(&self) -> bool {
        self.expected_status.is_none()
            && self.substring.is_none()
            && self.exact.is_none()
            && self.pattern.is_none()
    }
}

/// Renders the set back into the inline grammar.
///
/// Values are not escaped, so a value containing `;` does not re-parse to
/// the same set. Use [`AssertionInput::Parsed`] to pass a set along as-is.
impl fmt::Display for AssertionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut pair = |f: &mut fmt::Formatter<'_>, key: &str, value: &dyn fmt::Display| {
            if !first {
                f.write_str(";")?;
            }
            first = false;
            write!(f, "{}={}", key, value)
        };

        if let Some(status) = self.expected_status {
            pair(f, STATUS_CODE, &status)?;
        }
        if let Some(substring) = &self.substring {
            pair(f, SUBSTRING_MATCH, substring)?;
        }
        if let Some(exact) = &self.exact {
            pair(f, EXACT_MATCH, exact)?;
        }
        if let Some(pattern) = &self.pattern {
            pair(f, REGEX_MATCH, pattern)?;
        }
        Ok(())
    }
}

/// A grammar that can produce an [`AssertionSet`].
pub trait AssertionParser {
    /// Raw input accepted by this grammar.
    type Input: ?Sized;

    /// Parse the input into a normalized assertion set.
    fn parse(&self, input: &Self::Input) -> Result<AssertionSet, ParseError>;
}

/// Assertion input in either supported grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionInput {
    /// `key=value;key=value` string.
    Inline(String),

    /// Options map plus a shared expected value.
    Flags(FlagSpec),

    /// An already normalized set.
    Parsed(AssertionSet),
}

impl AssertionInput {
    /// Parse with the grammar matching this input.
    pub fn parse(&self) -> Result<AssertionSet, ParseError> {
        match self {
            AssertionInput::Inline(raw) => InlineParser.parse(raw),
            AssertionInput::Flags(spec) => FlagParser.parse(spec),
            AssertionInput::Parsed(set) => Ok(set.clone()),
        }
    }
}

impl Default for AssertionInput {
    fn default() -> Self {
        AssertionInput::Inline(String::new())
    }
}

impl From<&str> for AssertionInput {
    fn from(raw: &str) -> Self {
        AssertionInput::Inline(raw.to_string())
    }
}

impl From<String> for AssertionInput {
    fn from(raw: String) -> Self {
        AssertionInput::Inline(raw)
    }
}

impl From<FlagSpec> for AssertionInput {
    fn from(spec: FlagSpec) -> Self {
        AssertionInput::Flags(spec)
    }
}

impl From<AssertionSet> for AssertionInput {
    fn from(set: AssertionSet) -> Self {
        AssertionInput::Parsed(set)
    }
}

/// Parse a status code value shared by both grammars.
///
/// `0` means "don't check the status" and yields `None`.
pub(crate) fn parse_status_code(raw: &str) -> Result<Option<i64>, ParseError> {
    let code = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidStatusCode(raw.to_string()))?;
    Ok((code != 0).then_some(code))
}
