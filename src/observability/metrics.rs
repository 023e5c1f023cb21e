//! Probe metrics.
//!
//! # Metrics
//! - `probe_checks_total` (counter): probes by outcome
//! - `probe_duration_seconds` (histogram): wall time from start to result
//!
//! Outcome labels: `pass`, `config`, `timeout`, `transport`, `parse`,
//! `mismatch`, `task`.

use std::time::Instant;

/// Record a finished probe.
pub fn record_probe(outcome: &'static str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();

    ::metrics::counter!("probe_checks_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("probe_duration_seconds", "outcome" => outcome).record(elapsed);
}
