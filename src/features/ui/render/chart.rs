use crate::app::MonitorApp;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType};

use super::format::{format_y_axis_labels, y_upper_bound};

pub(super) fn draw_chart(frame: &mut ratatui::Frame, area: Rect, app: &MonitorApp) {
    frame.render_widget(Clear, area);

    let series = &app.view().chart;
    let first_x = series.points.first().map(|(x, _)| *x).unwrap_or(1.0);
    let last_x = series.points.last().map(|(x, _)| *x).unwrap_or(1.0);
    let max_x = last_x.max(first_x + 1.0);
    let max_y = y_upper_bound(series.max);

    let mut datasets = vec![
        Dataset::default()
            .name("RTT")
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::Green))
            .data(&series.points),
    ];

    let mut legend = vec![
        Span::styled("■ ", Style::default().fg(Color::Green)),
        Span::styled("RTT", Style::default().fg(Color::Green)),
    ];
    if !series.lost_points.is_empty() {
        legend.push(Span::raw("  "));
        legend.push(Span::styled("● ", Style::default().fg(Color::Red)));
        legend.push(Span::styled("Lost", Style::default().fg(Color::Red)));
        datasets.push(
            Dataset::default()
                .name("Lost")
                .graph_type(GraphType::Scatter)
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(Color::Red))
                .data(&series.lost_points),
        );
    }

    let title = format!(" Ping RTT [{}] ", app.scale.label());
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .title_bottom(Line::from(legend).alignment(Alignment::Center))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().bg(Color::Black))
        .x_axis(
            Axis::default()
                .title("seq")
                .style(Style::default().fg(Color::Gray))
                .bounds([first_x, max_x])
                .labels(vec![
                    Span::raw(format!("{}", first_x as u64)),
                    Span::styled(format!("{}", max_x as u64), Style::default().fg(Color::Green)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("ms")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max_y])
                .labels(format_y_axis_labels(0.0, max_y, app.scale)),
        );
    frame.render_widget(chart, area);
}
