use crate::config::MonitorConfig;
use crate::probe::Measurement;
use hdrhistogram::Histogram;
use std::time::Duration;

use super::super::StatsSnapshot;

/// Histogram range in microseconds: 1µs to one minute.
const HISTOGRAM_LOW_US: u64 = 1;
const HISTOGRAM_HIGH_US: u64 = 60_000_000;
const HISTOGRAM_SIGFIG: u8 = 3;

/// Derives the live statistics from a snapshot of the series.
pub fn summarize(
    measurements: &[Measurement],
    config: &MonitorConfig,
    elapsed: Duration,
) -> StatsSnapshot {
    let timeout_ms = config.timeout_ms();
    let valid: Vec<f64> = measurements
        .iter()
        .filter_map(|m| m.outcome.latency_ms())
        .collect();

    let total = measurements.len() as u64;
    let lost_count = total - valid.len() as u64;
    let over_timeout = valid.iter().filter(|ms| **ms > timeout_ms).count() as u64;

    let mut timeout_count = 0u64;
    let mut longest_run = 0u64;
    let mut current_run = 0u64;
    for measurement in measurements {
        let bad = match measurement.outcome.latency_ms() {
            Some(ms) => ms >= timeout_ms,
            None => true,
        };
        if bad {
            timeout_count += 1;
            current_run += 1;
            longest_run = longest_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    let mut stats = StatsSnapshot {
        total,
        valid: valid.len() as u64,
        lost_count,
        timeout_count,
        longest_timeout_run: longest_run,
        elapsed,
        ..StatsSnapshot::default()
    };

    if total > 0 {
        stats.pct_over_timeout = over_timeout as f64 / total as f64 * 100.0;
        stats.pct_lost = lost_count as f64 / total as f64 * 100.0;
    }

    if valid.is_empty() {
        return stats;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for value in &valid {
        min = min.min(*value);
        max = max.max(*value);
        sum += value;
    }
    let mean = sum / valid.len() as f64;
    let mut variance_sum = 0.0;
    for value in &valid {
        let diff = value - mean;
        variance_sum += diff * diff;
    }

    stats.average_ms = mean;
    stats.min_ms = min;
    stats.max_ms = max;
    stats.stddev_ms = (variance_sum / valid.len() as f64).sqrt();
    stats.jitter_ms = jitter(&valid);

    let (p50, p90, p99) = percentiles(&valid);
    stats.p50_ms = p50;
    stats.p90_ms = p90;
    stats.p99_ms = p99;

    stats
}

/// Mean absolute difference between neighbours of the filtered list.
fn jitter(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    sum / (values.len() - 1) as f64
}

fn percentiles(values: &[f64]) -> (f64, f64, f64) {
    // bounds are constant and valid
    let Ok(mut histogram) =
        Histogram::<u64>::new_with_bounds(HISTOGRAM_LOW_US, HISTOGRAM_HIGH_US, HISTOGRAM_SIGFIG)
    else {
        return (0.0, 0.0, 0.0);
    };
    for value in values {
        let micros = (*value * 1000.0).max(0.0) as u64;
        histogram.saturating_record(micros);
    }
    (
        histogram.value_at_quantile(0.50) as f64 / 1000.0,
        histogram.value_at_quantile(0.90) as f64 / 1000.0,
        histogram.value_at_quantile(0.99) as f64 / 1000.0,
    )
}
