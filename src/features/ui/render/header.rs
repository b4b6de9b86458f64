use crate::app::MonitorApp;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub(super) fn draw_header(frame: &mut ratatui::Frame, area: Rect, app: &MonitorApp) {
    let (status, status_color) = if app.view().fault.is_some() {
        ("halted", Color::Red)
    } else {
        ("probing", Color::Green)
    };

    let header = Line::from(vec![
        Span::styled(
            " pingpulse ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled("Target:", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {} ({}) ", app.host, app.address),
            Style::default().fg(Color::White),
        ),
        Span::raw("│ "),
        Span::styled("Family:", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {} ", app.config.family),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("│ "),
        Span::styled("Scale:", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {} ", app.scale.label()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("│ "),
        Span::styled(status, Style::default().fg(status_color)),
    ]);

    let paragraph = Paragraph::new(header).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &MonitorApp) {
    let line = match &app.view().fault {
        Some(fault) => Line::from(vec![
            Span::styled(" probe engine stopped: ", Style::default().fg(Color::Red)),
            Span::styled(fault.clone(), Style::default().fg(Color::White)),
            Span::styled("  q ", Style::default().fg(Color::Yellow)),
            Span::styled("Quit ", Style::default().fg(Color::Gray)),
        ]),
        None => {
            let hints = [("q/Esc", "Quit"), ("l", "Linear/Log")];
            let spans: Vec<Span> = hints
                .iter()
                .flat_map(|(key, action)| {
                    vec![
                        Span::styled(format!(" {key} "), Style::default().fg(Color::Yellow)),
                        Span::styled(format!("{action} "), Style::default().fg(Color::Gray)),
                    ]
                })
                .collect();
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(footer, area);
}
