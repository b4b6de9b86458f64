mod input;
mod render;
mod state;

use crate::app::{MonitorApp, UiEvent};
use crossterm::event;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{QueueableCommand, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout, Write};
use std::time::Instant;

use input::translate_event;
use render::draw;
use state::TICK_RATE;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal until the session stops, then restores it.
pub fn run_ui(app: &mut MonitorApp) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);
    cleanup_terminal(&mut terminal)?;
    result
}

fn event_loop(terminal: &mut Term, app: &mut MonitorApp) -> io::Result<()> {
    if !app.tick() {
        return Ok(());
    }
    terminal.draw(|frame| draw(frame, app))?;
    let mut last_tick = Instant::now();

    while app.is_running() {
        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Some(ui_event) = translate_event(event::read()?)
        {
            app.handle_event(ui_event);
            match ui_event {
                UiEvent::Quit => break,
                UiEvent::ToggleScale | UiEvent::Resize(..) => {
                    terminal.draw(|frame| draw(frame, app))?;
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
            if !app.tick() {
                break;
            }
            terminal.draw(|frame| draw(frame, app))?;
        }
    }

    Ok(())
}

fn cleanup_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().queue(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    terminal.backend_mut().flush()?;
    Ok(())
}
