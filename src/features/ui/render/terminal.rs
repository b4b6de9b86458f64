use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::super::state::{MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH};

pub(super) fn draw_terminal_too_small(frame: &mut ratatui::Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::styled(
            "Terminal Too Small",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::raw("Current: "),
            Span::styled(
                format!("{}x{}", area.width, area.height),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw("Minimum: "),
            Span::styled(
                format!("{MIN_TERMINAL_WIDTH}x{MIN_TERMINAL_HEIGHT}"),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::styled("probing continues", Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" pingpulse "),
    );

    frame.render_widget(paragraph, area);
}
