//! Flag+value assertion grammar.
//!
//! An options map switches checks on by key presence, and a single shared
//! expected value is used by every active body check. `status_code` carries
//! its own integer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assertion::types::{parse_status_code, AssertionParser, AssertionSet, ParseError};
use crate::assertion::{EXACT_MATCH, REGEX_MATCH, STATUS_CODE, SUBSTRING_MATCH};

/// Typed value of a single option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Integer(i64),
    Text(String),
}

/// Options map paired with the shared expected value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSpec {
    /// Option name to value.
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,

    /// Literal compared by whichever body checks are active.
    #[serde(default)]
    pub expected: String,
}

impl FlagSpec {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            options: BTreeMap::new(),
            expected: expected.into(),
        }
    }

    /// Activate a body check by name.
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.options.insert(name.into(), OptionValue::Flag(true));
        self
    }

    /// Set the expected status code.
    pub fn with_status(mut self, code: i64) -> Self {
        self.options
            .insert(STATUS_CODE.to_string(), OptionValue::Integer(code));
        self
    }
}

/// Parser for [`FlagSpec`] input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagParser;

impl AssertionParser for FlagParser {
    type Input = FlagSpec;

    fn parse(&self, input: &FlagSpec) -> Result<AssertionSet, ParseError> {
        let mut set = AssertionSet::default();

        for (key, value) in &input.options {
            match key.as_str() {
                STATUS_CODE => set.expected_status = status_from_option(value)?,
                SUBSTRING_MATCH => set.substring = Some(input.expected.clone()),
                REGEX_MATCH => set.pattern = Some(input.expected.clone()),
                EXACT_MATCH => set.exact = Some(input.expected.clone()),
                other => {
                    tracing::debug!(key = %other, "Ignoring unknown assertion option");
                }
            }
        }

        Ok(set)
    }
}

fn status_from_option(value: &OptionValue) -> Result<Option<i64>, ParseError> {
    match value {
        OptionValue::Integer(code) => Ok((*code != 0).then_some(*code)),
        OptionValue::Text(raw) => parse_status_code(raw),
        OptionValue::Flag(flag) => Err(ParseError::InvalidStatusCode(flag.to_string())),
    }
}
