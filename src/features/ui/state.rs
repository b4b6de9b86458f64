use std::time::Duration;

/// Minimum terminal width required (columns)
pub(super) const MIN_TERMINAL_WIDTH: u16 = 60;
/// Minimum terminal height required (rows)
pub(super) const MIN_TERMINAL_HEIGHT: u16 = 20;
/// Width of the statistics panel beside the chart
pub(super) const STATS_PANEL_WIDTH: u16 = 34;

pub(super) const TICK_RATE: Duration = Duration::from_secs(1);
