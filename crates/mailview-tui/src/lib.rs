//! mailview-tui: Terminal UI for previewing generated email markup
//!
//! This crate provides the TUI layer for mailview, including:
//! - The tabbed code panel with copy and download actions
//! - Regex-based syntax highlighting
//! - The system clipboard backend
//! - Headless mode for testing and automation

mod app;
mod clipboard;
mod event;
pub mod headless;
mod highlight;
mod layout;
#[cfg(test)]
pub mod test_utils;
pub mod theme;
mod view;
pub mod widgets;

pub use app::{App, AppOptions, Notification};
pub use clipboard::SystemClipboard;
pub use event::{key_to_action, mouse_to_action, Action, Event, EventHandler};
pub use highlight::{Highlighter, RegexHighlighter, TokenRule};
pub use mailview_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mailview_engine::MarkupSet;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on exit (also on error or panic unwinding).
pub async fn run_tui(
    markups: MarkupSet,
    options: AppOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate_ms = options.config.effective_tick_rate_ms();
    let mut app = App::new(markups, options);
    let mut events = EventHandler::new(tick_rate_ms);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            view::draw(app, area, frame.buffer_mut());
        })?;

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Event::Key(key)) => app.handle_action(key_to_action(key)),
                Some(Event::Mouse(mouse)) => app.handle_action(mouse_to_action(mouse)),
                Some(Event::Tick) => app.tick(),
                // Redrawn at the top of the loop.
                Some(Event::Resize(_, _)) => {}
                None => return Ok(()),
            },
            Some(event) = app.recv_panel_event() => app.handle_panel_event(event),
        }
    }
}
