//! HTTP probe library.
//!
//! Issues one HTTP request, checks the response against a set of
//! assertions and reports `(success, message)` within a deadline.

pub mod assertion;
pub mod config;
pub mod observability;
pub mod probe;

pub use assertion::{AssertionInput, AssertionSet, FlagSpec};
pub use config::ProbeConfig;
pub use probe::{run, Deadline, ProbeRequest, ProbeResult, Prober};
