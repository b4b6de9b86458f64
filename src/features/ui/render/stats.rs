use crate::app::MonitorApp;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::format::style_for_loss;

pub(super) fn draw_stats(frame: &mut ratatui::Frame, area: Rect, app: &MonitorApp) {
    let view = app.view();
    let loss_style = style_for_loss(view.stats.pct_lost);

    let mut lines: Vec<Line> = view
        .stats_text
        .lines()
        .map(|line| {
            if line.starts_with("% Lost") || line.starts_with("N lost") {
                Line::styled(line.to_string(), loss_style)
            } else if line.starts_with("---") {
                Line::styled(line.to_string(), Style::default().fg(Color::DarkGray))
            } else {
                Line::raw(line.to_string())
            }
        })
        .collect();

    if let Some(fault) = &view.fault {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(
                "halted: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(fault.clone(), Style::default().fg(Color::Red)),
        ]));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
