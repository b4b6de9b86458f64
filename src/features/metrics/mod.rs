pub mod aggregate;
pub mod report;

use serde::Serialize;
use std::time::Duration;

/// Statistics derived from one snapshot of the series. Every numeric field
/// is zero when there is nothing to derive it from.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub total: u64,
    pub valid: u64,
    pub lost_count: u64,
    /// Samples that were lost or reached the timeout.
    pub timeout_count: u64,
    pub average_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub stddev_ms: f64,
    pub jitter_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p99_ms: f64,
    pub pct_over_timeout: f64,
    pub pct_lost: f64,
    pub longest_timeout_run: u64,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}
