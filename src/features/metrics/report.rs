use super::StatsSnapshot;
use crate::config::MonitorConfig;

/// Multi-line statistics text shown in the stats panel and printed on exit.
pub fn format_report(stats: &StatsSnapshot, config: &MonitorConfig) -> String {
    let lines = [
        format!("Average: {:.2} ms", stats.average_ms),
        format!("Max: {:.2} ms", stats.max_ms),
        format!("Min: {:.2} ms", stats.min_ms),
        format!("Std Dev: {:.2} ms", stats.stddev_ms),
        format!("Jitter: {:.2} ms", stats.jitter_ms),
        format!(
            "P50/P90/P99: {:.1}/{:.1}/{:.1} ms",
            stats.p50_ms, stats.p90_ms, stats.p99_ms
        ),
        format!("% Timeout (>): {:.2}%", stats.pct_over_timeout),
        format!("% Lost: {:.2}%", stats.pct_lost),
        format!("Total N: {}", stats.total),
        format!("N timeout: {}", stats.timeout_count),
        format!("Max N seq timeout: {}", stats.longest_timeout_run),
        format!("N lost: {}", stats.lost_count),
        "--- settings ---".to_string(),
        format!("-W timeout: {} ms", config.timeout.as_millis()),
        format!("-D dead timeout: {:.0} ms", config.dead_timeout_ms),
        format!("-i interval: {:.2} s", config.interval.as_secs_f64()),
        String::new(),
        format!("Run time: {:.2} s", stats.elapsed.as_secs_f64()),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::format_report;
    use crate::config::MonitorConfig;
    use crate::features::metrics::StatsSnapshot;
    use std::time::Duration;

    #[test]
    fn report_lists_stats_and_settings() {
        let stats = StatsSnapshot {
            total: 4,
            lost_count: 1,
            timeout_count: 2,
            average_ms: 12.5,
            pct_lost: 25.0,
            longest_timeout_run: 2,
            elapsed: Duration::from_millis(2500),
            ..StatsSnapshot::default()
        };
        let text = format_report(&stats, &MonitorConfig::default());

        assert!(text.contains("Average: 12.50 ms"));
        assert!(text.contains("% Lost: 25.00%"));
        assert!(text.contains("Total N: 4"));
        assert!(text.contains("N timeout: 2"));
        assert!(text.contains("Max N seq timeout: 2"));
        assert!(text.contains("-W timeout: 150 ms"));
        assert!(text.contains("-D dead timeout: 500 ms"));
        assert!(text.contains("-i interval: 0.10 s"));
        assert!(text.ends_with("Run time: 2.50 s"));
    }

    #[test]
    fn report_lines_keep_their_order() {
        let stats = StatsSnapshot {
            total: 3,
            valid: 2,
            lost_count: 1,
            timeout_count: 1,
            average_ms: 10.0,
            max_ms: 12.0,
            min_ms: 8.0,
            stddev_ms: 1.5,
            jitter_ms: 4.0,
            p50_ms: 10.0,
            p90_ms: 12.0,
            p99_ms: 12.0,
            pct_over_timeout: 0.0,
            pct_lost: 33.333,
            longest_timeout_run: 1,
            elapsed: Duration::from_secs(1),
        };
        let text = format_report(&stats, &MonitorConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Average: 10.00 ms",
                "Max: 12.00 ms",
                "Min: 8.00 ms",
                "Std Dev: 1.50 ms",
                "Jitter: 4.00 ms",
                "P50/P90/P99: 10.0/12.0/12.0 ms",
                "% Timeout (>): 0.00%",
                "% Lost: 33.33%",
                "Total N: 3",
                "N timeout: 1",
                "Max N seq timeout: 1",
                "N lost: 1",
                "--- settings ---",
                "-W timeout: 150 ms",
                "-D dead timeout: 500 ms",
                "-i interval: 0.10 s",
                "",
                "Run time: 1.00 s",
            ]
        );
    }
}
