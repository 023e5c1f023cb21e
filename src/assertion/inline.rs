//! Inline assertion grammar.
//!
//! Input is a `;` separated list of `key=value` pairs, e.g.
//! `status_code=200;regex_match=\d`. Keys are trimmed, values are kept
//! verbatim and a value may itself contain `=`.

use crate::assertion::types::{parse_status_code, AssertionParser, AssertionSet, ParseError};
use crate::assertion::{EXACT_MATCH, REGEX_MATCH, STATUS_CODE, SUBSTRING_MATCH};

/// Parser for the `key=value;key=value` grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineParser;

impl AssertionParser for InlineParser {
    type Input = str;

    fn parse(&self, input: &str) -> Result<AssertionSet, ParseError> {
        let mut set = AssertionSet::default();

        for segment in input.split(';') {
            if segment.trim().is_empty() {
                continue;
            }

            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ParseError::InvalidSegment(segment.to_string()))?;

            match key.trim() {
                STATUS_CODE => set.expected_status = parse_status_code(value)?,
                SUBSTRING_MATCH => set.substring = Some(value.to_string()),
                REGEX_MATCH => set.pattern = Some(value.to_string()),
                EXACT_MATCH => set.exact = Some(value.to_string()),
                other => {
                    tracing::debug!(key = %other, "Ignoring unknown assertion key");
                }
            }
        }

        Ok(set)
    }
}
