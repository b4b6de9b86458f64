mod chart;
mod format;
mod header;
mod stats;
mod terminal;

use crate::app::MonitorApp;
use ratatui::layout::{Constraint, Direction, Layout};

use super::state::{MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, STATS_PANEL_WIDTH};
use chart::draw_chart;
use header::{draw_footer, draw_header};
use stats::draw_stats;
use terminal::draw_terminal_too_small;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &MonitorApp) {
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH || size.height < MIN_TERMINAL_HEIGHT {
        draw_terminal_too_small(frame, size);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(size);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(STATS_PANEL_WIDTH)])
        .split(rows[1]);

    draw_header(frame, rows[0], app);
    draw_chart(frame, body[0], app);
    draw_stats(frame, body[1], app);
    draw_footer(frame, rows[2], app);
}
