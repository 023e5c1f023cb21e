//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probe executor produces:
//!     → logging.rs (structured log events, one span per probe)
//!     → metrics.rs (outcome counters, latency histogram)
//!
//! Consumers:
//!     → Log output (stderr, human or JSON)
//!     → Whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Probe ID (UUID v4) is attached to every event of a probe
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops

pub mod logging;
pub mod metrics;
