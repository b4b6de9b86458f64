use crate::app::ScaleMode;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub(super) fn format_latency(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else if ms >= 100.0 {
        format!("{:.0}ms", ms)
    } else if ms >= 10.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{:.2}ms", ms)
    }
}

/// Axis labels in milliseconds whatever the scale; log positions are
/// mapped back through 10^y.
pub(super) fn format_y_axis_labels(min_y: f64, max_y: f64, scale: ScaleMode) -> Vec<Span<'static>> {
    let mid_y = (min_y + max_y) / 2.0;
    let to_ms = |y: f64| match scale {
        ScaleMode::Linear => y,
        ScaleMode::Log => 10f64.powf(y),
    };

    vec![
        Span::raw(format_latency(to_ms(min_y))),
        Span::raw(format_latency(to_ms(mid_y))),
        Span::raw(format_latency(to_ms(max_y))),
    ]
}

/// Upper y bound with 10% headroom; never collapses to zero.
pub(super) fn y_upper_bound(max: f64) -> f64 {
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

pub(super) fn style_for_loss(pct_lost: f64) -> Style {
    if pct_lost == 0.0 {
        Style::default().fg(Color::Green)
    } else if pct_lost <= 5.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Red)
    }
}
