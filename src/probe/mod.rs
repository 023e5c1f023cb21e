//! Probe execution subsystem.
//!
//! # Data Flow
//! ```text
//! run(target, verb, assertions, username, password, deadline)
//!     → verb.rs (normalize, reject unknown verbs before any I/O)
//!     → executor.rs (build request, inject credentials)
//!     → spawn exchange task ──┐
//!     → race against deadline.rs
//!          │                  │
//!          ▼                  ▼
//!     Timeout (task       send → parse assertions → compare
//!     cancelled)              │
//!                             ▼
//!     result.rs (ProbeError → ProbeResult(success, message))
//! ```
//!
//! # Design Decisions
//! - The exchange task observes a cancellation token; a timed-out probe
//!   drops its connection instead of leaking it
//! - No retries, no shared client between probes
//! - Errors stay typed until the ProbeResult boundary

pub mod deadline;
pub mod executor;
pub mod result;
pub mod verb;

pub use deadline::{Deadline, DeadlineError};
pub use executor::{run, ProbeRequest, Prober};
pub use result::{ProbeError, ProbeResult};
pub use verb::{parse_verb, SUPPORTED_VERBS};
