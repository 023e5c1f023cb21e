//! Response assertion subsystem.
//!
//! # Data Flow
//! ```text
//! Inline string ("status_code=200;regex_match=\d")
//!     → inline.rs (InlineParser)
//!     → AssertionSet
//!
//! Options map + shared expected value
//!     → flags.rs (FlagParser)
//!     → AssertionSet
//!
//! AssertionSet + reqwest::Response
//!     → evaluator.rs (status, body read once, substring, exact, regex)
//!     → Ok / ComparisonError
//! ```
//!
//! # Design Decisions
//! - One canonical AssertionSet; grammars are adapters in front of it
//! - Unknown keys are ignored by both grammars
//! - First failing check wins; later checks are not evaluated

pub mod evaluator;
pub mod flags;
pub mod inline;
pub mod types;

pub use evaluator::ComparisonError;
pub use flags::{FlagParser, FlagSpec, OptionValue};
pub use inline::InlineParser;
pub use types::{AssertionInput, AssertionParser, AssertionSet, ParseError};

/// Inline grammar key for the expected status code.
pub const STATUS_CODE: &str = "status_code";
/// Inline grammar key for a substring check.
pub const SUBSTRING_MATCH: &str = "substring_match";
/// Inline grammar key for a regular expression check.
pub const REGEX_MATCH: &str = "regex_match";
/// Inline grammar key for an exact body match.
pub const EXACT_MATCH: &str = "match";
