//! Headless mode for the mailview TUI.
//!
//! Runs the same loop as [`crate::run_tui`] against a `TestBackend`. Actions
//! are sent over a channel and the screen is published after each render,
//! which is what the end-to-end tests drive.

use crate::app::{App, AppOptions};
use crate::event::Action;
use crate::view;
use mailview_engine::{Language, MarkupSet};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Active tab, `None` before the first render.
    pub active: Option<Language>,
    /// Whether the copied indicator is on.
    pub copied: bool,
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Current footer notification.
    pub notification: Option<String>,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.action_tx.send(action).is_ok()
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait for the state to change, with a timeout.
    ///
    /// Returns `true` if state changed, `false` if timed out.
    pub async fn wait_for_change(&mut self, timeout: Duration) -> bool {
        matches!(
            tokio::time::timeout(timeout, self.state_rx.changed()).await,
            Ok(Ok(()))
        )
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // Timed out, or the loop has exited for good.
                Ok(Err(_)) | Err(_) => {
                    let state = self.state();
                    return condition(&state).then_some(state);
                }
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50, // Faster tick rate for testing
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background task.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(markups, options, HeadlessConfig::default());
///
/// handle.send_action(Action::Tab(1));
/// let state = handle.wait_for_text("HTML", Duration::from_secs(1)).await;
///
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    markups: MarkupSet,
    options: AppOptions,
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        let app = App::new(markups, options);
        run_headless_loop(app, config, action_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle {
        action_tx,
        state_rx,
    };

    (handle, task)
}

async fn run_headless_loop(
    mut app: App,
    config: HeadlessConfig,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_rate_ms.max(1)));

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            view::draw(&mut app, area, frame.buffer_mut());
        })?;

        let _ = state_tx.send(HeadlessState {
            active: Some(app.active()),
            copied: app.is_copied(),
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            notification: app.notification.as_ref().map(|n| n.text.clone()),
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            break;
        }

        tokio::select! {
            action = action_rx.recv() => match action {
                Some(action) => app.handle_action(action),
                // Every handle is gone; nobody can stop us otherwise.
                None => break,
            },
            Some(event) = app.recv_panel_event() => app.handle_panel_event(event),
            _ = ticker.tick() => app.tick(),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to a string representation.
fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
