//! Application state and update logic for the mailview TUI.
//!
//! The app is the host of the code panel: it owns the active language and
//! hands the panel a setter through [`App::select_tab`]. Background work
//! (clipboard writes, copied-flag resets) reports back over a channel that
//! the run loop drains into [`App::handle_panel_event`].

use crate::event::Action;
use crate::highlight::RegexHighlighter;
use crate::theme::{BorderSet, IconMode, IconSet, Theme};
use crate::widgets::{CodePanel, CodePanelState, MessageKind, PanelHit, StatusBarContent};
use mailview_engine::{
    spawn_copy, Clipboard, Config, CopyOutcome, Language, MarkupSet, MarkupVariant, PanelEvent,
    PanelState, ResetTimer,
};
use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Everything the app needs besides the markup itself.
#[derive(Clone)]
pub struct AppOptions {
    pub config: Config,
    pub clipboard: Arc<dyn Clipboard>,
    /// Shown in the status bar (usually the source directory).
    pub source_label: Option<String>,
    /// Initial tab; falls back to the configured default.
    pub active: Option<Language>,
}

impl AppOptions {
    pub fn new(config: Config, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            config,
            clipboard,
            source_label: None,
            active: None,
        }
    }

    #[must_use]
    pub fn source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn active(mut self, language: Language) -> Self {
        self.active = Some(language);
        self
    }
}

/// A transient message in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: MessageKind,
}

/// The application.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether to show the help overlay.
    pub show_help: bool,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<Notification>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Tick counter.
    pub tick: usize,

    /// Path of the last saved download.
    pub last_download: Option<PathBuf>,

    markups: MarkupSet,
    active: Language,
    panel: CodePanelState,
    config: Config,
    clipboard: Arc<dyn Clipboard>,
    source_label: Option<String>,
    reset_timer: ResetTimer,
    panel_tx: mpsc::UnboundedSender<PanelEvent>,
    panel_rx: mpsc::UnboundedReceiver<PanelEvent>,

    pub(crate) theme: Theme,
    pub(crate) icons: IconSet,
    pub(crate) borders: BorderSet,
    pub(crate) highlighter: RegexHighlighter,
}

impl App {
    /// Create a new app instance.
    pub fn new(markups: MarkupSet, options: AppOptions) -> Self {
        let AppOptions {
            config,
            clipboard,
            source_label,
            active,
        } = options;

        let requested = active.unwrap_or(config.default_language);
        let active = markups.resolve_active(requested);
        if active != requested {
            debug!(%requested, %active, "Requested tab not available");
        }

        let mode = IconMode::from(config.effective_icons());
        let theme = Theme::default();
        let highlighter = RegexHighlighter::new(&theme);
        let (panel_tx, panel_rx) = mpsc::unbounded_channel();

        let mut panel = CodePanelState::new();
        panel.panel.sync_selection(active);

        Self {
            should_quit: false,
            show_help: false,
            notification: None,
            notification_ttl: 0,
            tick: 0,
            last_download: None,
            markups,
            active,
            panel,
            config,
            clipboard,
            source_label,
            reset_timer: ResetTimer::new(),
            panel_tx,
            panel_rx,
            theme,
            icons: IconSet::new(mode),
            borders: BorderSet::new(mode),
            highlighter,
        }
    }

    pub fn markups(&self) -> &MarkupSet {
        &self.markups
    }

    /// The active language (the selection shown by the panel).
    pub fn active(&self) -> Language {
        self.active
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn panel(&self) -> &CodePanelState {
        &self.panel
    }

    /// Draw the code panel, syncing the selection into its state.
    pub(crate) fn render_panel(&mut self, area: Rect, buf: &mut Buffer) {
        CodePanel::new(&self.markups, self.active, &self.highlighter, &self.theme)
            .icons(&self.icons, &self.borders)
            .line_numbers(self.config.line_numbers)
            .title("Preview")
            .render(area, buf, &mut self.panel);
    }

    /// Whether the copied indicator is on.
    pub fn is_copied(&self) -> bool {
        self.panel.panel.is_copied()
    }

    /// Whether a copied-flag reset is scheduled.
    pub fn reset_pending(&self) -> bool {
        self.reset_timer.is_pending()
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            Action::Hover(x, y) => {
                self.panel.hover(x, y);
                return;
            }
            Action::None => return,
            _ => {}
        }

        // If help is showing, any other key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match action {
            Action::Back => self.should_quit = true,
            Action::NextTab => self.set_active(self.markups.next_language(self.active)),
            Action::PrevTab => self.set_active(self.markups.prev_language(self.active)),
            Action::Tab(index) => self.select_tab(index),
            Action::Copy => self.copy_active(),
            Action::Download => self.download_active(),
            Action::Up => self.scroll_by(-1),
            Action::Down => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-self.page_size()),
            Action::PageDown => self.scroll_by(self.page_size()),
            Action::Top => self.panel.scroll_to_top(self.active),
            Action::Bottom => {
                let total = self.active_line_count();
                self.panel.scroll_to_bottom(self.active, total);
            }
            Action::Click(x, y) => self.click(x, y),
            Action::Quit | Action::Help | Action::Hover(..) | Action::None => {}
        }

        self.sync_selection();
    }

    /// Change the active language. Languages without a variant are ignored.
    pub fn set_active(&mut self, language: Language) {
        if !self.markups.contains(language) {
            return;
        }
        self.active = language;
        self.sync_selection();
    }

    /// Select the tab at `index` through the panel.
    pub fn select_tab(&mut self, index: usize) {
        let mut chosen = None;
        PanelState::select_tab(&self.markups, index, |language| chosen = Some(language));
        if let Some(language) = chosen {
            self.set_active(language);
        }
    }

    /// Push the current selection into the panel.
    ///
    /// A changed selection clears the copied flag, so the pending reset has
    /// nothing left to do.
    fn sync_selection(&mut self) {
        if self.panel.panel.sync_selection(self.active) {
            self.reset_timer.cancel();
        }
    }

    /// Start copying the active variant to the clipboard.
    pub fn copy_active(&mut self) {
        if !PanelState::actions_enabled(&self.markups, self.active) {
            self.set_notification(MessageKind::Error, "Nothing to copy");
            return;
        }
        let Some(request) = self.panel.panel.begin_copy(&self.markups, self.active) else {
            return;
        };
        spawn_copy(Arc::clone(&self.clipboard), request, self.panel_tx.clone());
    }

    /// Save the active variant under the download directory.
    pub fn download_active(&mut self) {
        let Some(artifact) = self.panel.panel.download(&self.markups, self.active) else {
            self.set_notification(MessageKind::Error, "Nothing to download");
            return;
        };
        match artifact.save_in(&self.config.download_dir) {
            Ok(path) => {
                self.set_notification(MessageKind::Success, format!("Saved {}", path.display()));
                self.last_download = Some(path);
            }
            Err(e) => self.set_notification(MessageKind::Error, format!("Download failed: {e}")),
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        match self.panel.hit_test(x, y) {
            Some(PanelHit::Tab(index)) => self.select_tab(index),
            Some(PanelHit::Copy) => self.copy_active(),
            Some(PanelHit::Download) => self.download_active(),
            None => {}
        }
    }

    fn active_line_count(&self) -> usize {
        self.markups
            .get(self.active)
            .map_or(0, MarkupVariant::line_count)
    }

    fn page_size(&self) -> isize {
        isize::try_from(self.panel.viewport_height().max(1)).unwrap_or(1)
    }

    fn scroll_by(&mut self, delta: isize) {
        let total = self.active_line_count();
        self.panel.scroll_by(self.active, delta, total);
    }

    /// Apply a message from background work.
    pub fn handle_panel_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::CopyFinished {
                epoch,
                language,
                result,
            } => match self.panel.panel.complete_copy(epoch, result) {
                CopyOutcome::Copied { reset_token } => {
                    self.reset_timer.schedule(
                        reset_token,
                        self.config.copied_reset_delay(),
                        self.panel_tx.clone(),
                    );
                    info!(%language, "Copied to clipboard");
                    self.set_notification(
                        MessageKind::Success,
                        format!("Copied {} to clipboard", language.label()),
                    );
                }
                CopyOutcome::Stale => {
                    debug!(%language, "Copy finished after selection changed");
                }
                CopyOutcome::Failed(err) => {
                    self.set_notification(MessageKind::Error, format!("Copy failed: {err}"));
                }
            },
            PanelEvent::ResetCopied { token } => {
                if self.panel.panel.reset_copied(token) {
                    debug!(token, "Copied flag reset");
                }
            }
        }
    }

    /// Handle every panel event that is already waiting.
    pub fn process_panel_events(&mut self) {
        while let Ok(event) = self.panel_rx.try_recv() {
            self.handle_panel_event(event);
        }
    }

    /// Wait for the next panel event.
    ///
    /// Never resolves to `None` while the app is alive, since the app holds
    /// a sender itself.
    pub async fn recv_panel_event(&mut self) -> Option<PanelEvent> {
        self.panel_rx.recv().await
    }

    /// Set a temporary notification message.
    pub fn set_notification(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.notification = Some(Notification {
            text: text.into(),
            kind,
        });
        self.notification_ttl = self.config.notification_ticks;
    }

    /// Called on each tick.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Text for the left side of the footer.
    pub fn footer_message(&self) -> Option<(&str, MessageKind)> {
        if let Some(ref n) = self.notification {
            return Some((n.text.as_str(), n.kind));
        }
        self.panel
            .hovered()
            .and_then(PanelHit::tooltip)
            .map(|t| (t, MessageKind::Tooltip))
    }

    /// Content for the top status bar.
    pub fn status_content(&self) -> StatusBarContent {
        StatusBarContent {
            source: self.source_label.clone(),
            language: self.active.label().to_string(),
            lines: self.markups.get(self.active).map(MarkupVariant::line_count),
            copied: self.is_copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, create_test_app_with, sample_markups};
    use mailview_engine::{ClipboardError, MemoryClipboard};
    use std::time::Duration;
    use tempfile::TempDir;

    fn hello_world() -> MarkupSet {
        MarkupSet::new(vec![
            MarkupVariant::new(Language::Markup, "hello"),
            MarkupVariant::new(Language::Markdown, "world"),
        ])
        .unwrap()
    }

    async fn settle(app: &mut App) {
        // Let the blocking clipboard write finish and report back.
        let event = tokio::time::timeout(Duration::from_secs(5), app.recv_panel_event())
            .await
            .expect("panel event")
            .expect("channel open");
        app.handle_panel_event(event);
    }

    #[test]
    fn test_initial_active_uses_config_default() {
        let app = create_test_app();
        assert_eq!(app.active(), Language::Jsx);
        assert!(!app.is_copied());
    }

    #[test]
    fn test_initial_active_falls_back_to_first() {
        let (app, _) = create_test_app_with(hello_world(), Config::default());
        assert_eq!(app.active(), Language::Markup);
    }

    #[test]
    fn test_explicit_active_option() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let options = AppOptions::new(Config::default(), clipboard).active(Language::Markdown);
        let app = App::new(sample_markups(), options);
        assert_eq!(app.active(), Language::Markdown);
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut app = create_test_app();
        app.handle_action(Action::NextTab);
        assert_eq!(app.active(), Language::Markup);
        app.handle_action(Action::NextTab);
        app.handle_action(Action::NextTab);
        assert_eq!(app.active(), Language::Jsx);
        app.handle_action(Action::PrevTab);
        assert_eq!(app.active(), Language::Markdown);
    }

    #[test]
    fn test_tab_by_index() {
        let mut app = create_test_app();
        app.handle_action(Action::Tab(2));
        assert_eq!(app.active(), Language::Markdown);
        app.handle_action(Action::Tab(7));
        assert_eq!(app.active(), Language::Markdown);
    }

    #[test]
    fn test_set_active_ignores_missing_language() {
        let (mut app, _) = create_test_app_with(hello_world(), Config::default());
        app.set_active(Language::Jsx);
        assert_eq!(app.active(), Language::Markup);
    }

    #[test]
    fn test_help_toggle_and_close() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        assert!(app.show_help);
        // Any other key closes help without acting
        app.handle_action(Action::NextTab);
        assert!(!app.show_help);
        assert_eq!(app.active(), Language::Jsx);
    }

    #[test]
    fn test_quit_closes_help_first() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        app.handle_action(Action::Quit);
        assert!(!app.should_quit);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_back_quits() {
        let mut app = create_test_app();
        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn test_notification_expires() {
        let mut app = create_test_app();
        app.set_notification(MessageKind::Info, "hi");
        for _ in 0..app.config().notification_ticks - 1 {
            app.tick();
        }
        assert!(app.notification.is_some());
        app.tick();
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_status_content() {
        let (app, _) = create_test_app_with(hello_world(), Config::default());
        let content = app.status_content();
        assert_eq!(content.language, "HTML");
        assert_eq!(content.lines, Some(1));
        assert!(!content.copied);
    }

    #[tokio::test]
    async fn test_copy_writes_active_content() {
        let (mut app, clipboard) = create_test_app_with(hello_world(), Config::default());
        app.handle_action(Action::Copy);
        settle(&mut app).await;

        assert_eq!(clipboard.writes(), vec!["hello".to_string()]);
        assert!(app.is_copied());
        assert!(app.reset_pending());
        assert!(app.footer_message().is_some_and(|(t, _)| t.contains("HTML")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_copied_resets_after_delay() {
        let (mut app, _) = create_test_app_with(hello_world(), Config::default());
        app.handle_action(Action::Copy);
        settle(&mut app).await;
        assert!(app.is_copied());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        app.process_panel_events();
        assert!(app.is_copied());

        settle(&mut app).await;
        assert!(!app.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recopy_extends_copied_window() {
        let (mut app, clipboard) = create_test_app_with(hello_world(), Config::default());
        app.handle_action(Action::Copy);
        settle(&mut app).await;

        tokio::time::sleep(Duration::from_millis(2000)).await;
        app.handle_action(Action::Copy);
        settle(&mut app).await;

        // The first reset would have fired here.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        app.process_panel_events();
        assert!(app.is_copied());

        settle(&mut app).await;
        assert!(!app.is_copied());
        assert_eq!(clipboard.writes().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_copy_notifies_and_leaves_flag() {
        let clipboard = Arc::new(MemoryClipboard::failing(ClipboardError::Unavailable(
            "no display".into(),
        )));
        let options = AppOptions::new(Config::default(), clipboard);
        let mut app = App::new(hello_world(), options);

        app.handle_action(Action::Copy);
        settle(&mut app).await;

        assert!(!app.is_copied());
        assert!(!app.reset_pending());
        let notification = app.notification.clone().unwrap();
        assert_eq!(notification.kind, MessageKind::Error);
        assert!(notification.text.contains("no display"));
    }

    #[tokio::test]
    async fn test_switch_mid_flight_never_shows_copied() {
        let (mut app, clipboard) = create_test_app_with(hello_world(), Config::default());
        app.handle_action(Action::Copy);
        app.handle_action(Action::NextTab);
        assert_eq!(app.active(), Language::Markdown);

        settle(&mut app).await;

        assert_eq!(clipboard.last().as_deref(), Some("hello"));
        assert!(!app.is_copied());
        assert!(!app.reset_pending());
    }

    #[tokio::test]
    async fn test_switch_after_copy_clears_flag_and_timer() {
        let (mut app, _) = create_test_app_with(hello_world(), Config::default());
        app.handle_action(Action::Copy);
        settle(&mut app).await;
        assert!(app.is_copied());

        app.handle_action(Action::Tab(1));
        assert!(!app.is_copied());
        assert!(!app.reset_pending());
    }

    #[test]
    fn test_download_saves_active_variant() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            download_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let (mut app, _) = create_test_app_with(hello_world(), config);

        app.handle_action(Action::Download);
        let path = app.last_download.clone().unwrap();
        assert_eq!(path, dir.path().join("email.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");

        app.handle_action(Action::Download);
        assert_eq!(app.last_download.as_ref(), Some(&path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_download_error_is_notified() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let config = Config {
            download_dir: blocker.join("sub"),
            ..Config::default()
        };
        let (mut app, _) = create_test_app_with(hello_world(), config);

        app.handle_action(Action::Download);
        assert!(app.last_download.is_none());
        assert_eq!(
            app.notification.as_ref().map(|n| n.kind),
            Some(MessageKind::Error)
        );
    }

    #[test]
    fn test_scroll_actions() {
        let body: String = (1..=50).map(|i| format!("{i}\n")).collect();
        let markups = MarkupSet::new(vec![MarkupVariant::new(Language::Markup, body)]).unwrap();
        let (mut app, _) = create_test_app_with(markups, Config::default());
        crate::test_utils::render_app_to_string(&mut app, 80, 24);

        app.handle_action(Action::Down);
        app.handle_action(Action::Down);
        assert_eq!(app.panel().scroll(Language::Markup), 2);
        app.handle_action(Action::Up);
        assert_eq!(app.panel().scroll(Language::Markup), 1);
        app.handle_action(Action::Bottom);
        let bottom = app.panel().scroll(Language::Markup);
        assert_eq!(bottom, 50 - app.panel().viewport_height());
        app.handle_action(Action::PageDown);
        assert_eq!(app.panel().scroll(Language::Markup), bottom);
        app.handle_action(Action::Top);
        assert_eq!(app.panel().scroll(Language::Markup), 0);
    }
}
