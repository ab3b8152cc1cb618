//! Tabbed code preview panel.
//!
//! Layout inside the border:
//!
//! ```text
//! [1] React | [2] HTML | [3] Plain Text        󰇚 Download  󰅍 Copy
//! ──────────────────────────────────────────────────────────────────
//!   1 <html>
//!   2   <body>
//! ```
//!
//! The host owns the active language and passes it in on every render. The
//! widget syncs it into [`PanelState`] before drawing, so a selection change
//! clears the copied indicator before the frame that shows the new tab.

use std::collections::HashMap;

use mailview_engine::{Language, MarkupSet, PanelState};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::tabs::TabBar;
use crate::highlight::Highlighter;
use crate::theme::{BorderSet, IconMode, IconSet, Theme};

/// Part of the panel under a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Tab(usize),
    Copy,
    Download,
}

impl PanelHit {
    /// Tooltip text for the action buttons.
    pub fn tooltip(self) -> Option<&'static str> {
        match self {
            Self::Copy => Some("Copy to Clipboard"),
            Self::Download => Some("Download"),
            Self::Tab(_) => None,
        }
    }
}

/// Everything the panel keeps between frames.
#[derive(Debug, Default)]
pub struct CodePanelState {
    /// Copied flag and selection tracking.
    pub panel: PanelState,
    scroll: HashMap<Language, usize>,
    highlighted: HashMap<Language, Vec<Line<'static>>>,
    tab_areas: Vec<Rect>,
    copy_area: Rect,
    download_area: Rect,
    viewport_height: usize,
    hovered: Option<PanelHit>,
}

impl CodePanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll offset of a pane, kept while the pane is hidden.
    pub fn scroll(&self, language: Language) -> usize {
        self.scroll.get(&language).copied().unwrap_or(0)
    }

    /// Scroll a pane by `delta` lines, clamped to its content.
    pub fn scroll_by(&mut self, language: Language, delta: isize, total_lines: usize) {
        let max = self.max_scroll(total_lines);
        let current = self.scroll(language);
        let next = current.saturating_add_signed(delta).min(max);
        self.scroll.insert(language, next);
    }

    pub fn scroll_to_top(&mut self, language: Language) {
        self.scroll.insert(language, 0);
    }

    pub fn scroll_to_bottom(&mut self, language: Language, total_lines: usize) {
        let max = self.max_scroll(total_lines);
        self.scroll.insert(language, max);
    }

    fn max_scroll(&self, total_lines: usize) -> usize {
        total_lines.saturating_sub(self.viewport_height.max(1))
    }

    /// Rows available for content in the last frame.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Map a screen position to a tab or button from the last frame.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<PanelHit> {
        let pos = Position::new(x, y);
        if let Some(index) = self.tab_areas.iter().position(|r| r.contains(pos)) {
            return Some(PanelHit::Tab(index));
        }
        if self.copy_area.contains(pos) {
            return Some(PanelHit::Copy);
        }
        if self.download_area.contains(pos) {
            return Some(PanelHit::Download);
        }
        None
    }

    /// Record the pointer position for tooltips.
    pub fn hover(&mut self, x: u16, y: u16) -> Option<PanelHit> {
        self.hovered = self.hit_test(x, y);
        self.hovered
    }

    pub fn hovered(&self) -> Option<PanelHit> {
        self.hovered
    }

    /// Whether a pane has been highlighted (it stays cached while hidden).
    pub fn is_highlighted(&self, language: Language) -> bool {
        self.highlighted.contains_key(&language)
    }
}

/// The code preview panel widget.
pub struct CodePanel<'a> {
    markups: &'a MarkupSet,
    active: Language,
    highlighter: &'a dyn Highlighter,
    theme: &'a Theme,
    icons: &'a IconSet,
    borders: &'a BorderSet,
    line_numbers: bool,
    title: Option<&'a str>,
}

impl<'a> CodePanel<'a> {
    pub fn new(
        markups: &'a MarkupSet,
        active: Language,
        highlighter: &'a dyn Highlighter,
        theme: &'a Theme,
    ) -> Self {
        Self {
            markups,
            active,
            highlighter,
            theme,
            icons: &DEFAULT_ICONS,
            borders: &DEFAULT_BORDERS,
            line_numbers: true,
            title: None,
        }
    }

    #[must_use]
    pub fn icons(mut self, icons: &'a IconSet, borders: &'a BorderSet) -> Self {
        self.icons = icons;
        self.borders = borders;
        self
    }

    #[must_use]
    pub fn line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    fn copy_label(&self, copied: bool) -> String {
        if copied {
            format!("{} Copied", self.icons.check())
        } else {
            format!("{} Copy", self.icons.clipboard())
        }
    }

    fn download_label(&self) -> String {
        format!("{} Download", self.icons.download())
    }

    /// Draw the action buttons right-aligned in `row`, returning their areas
    /// as (download, copy).
    #[allow(clippy::cast_possible_truncation)]
    fn render_actions(&self, row: Rect, buf: &mut Buffer, state: &CodePanelState) -> (Rect, Rect) {
        let enabled = PanelState::actions_enabled(self.markups, self.active);
        let copied = state.panel.is_copied();
        let copy = self.copy_label(copied);
        let download = self.download_label();

        let copy_w = copy.width() as u16;
        let download_w = download.width() as u16;
        let total = download_w + 2 + copy_w;
        if row.width < total + 1 {
            return (Rect::default(), Rect::default());
        }

        let right = row.x + row.width;
        let copy_area = Rect::new(right - copy_w, row.y, copy_w, 1);
        let download_area = Rect::new(copy_area.x - 2 - download_w, row.y, download_w, 1);

        let base = if enabled {
            Style::default().fg(self.theme.subtext)
        } else {
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::DIM)
        };
        let hover = |hit: PanelHit| {
            if enabled && state.hovered == Some(hit) {
                base.fg(self.theme.text).add_modifier(Modifier::BOLD)
            } else {
                base
            }
        };
        let copy_style = if copied {
            Style::default().fg(self.theme.success)
        } else {
            hover(PanelHit::Copy)
        };

        buf.set_string(download_area.x, row.y, &download, hover(PanelHit::Download));
        buf.set_string(copy_area.x, row.y, &copy, copy_style);
        (download_area, copy_area)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_pane(&self, area: Rect, buf: &mut Buffer, state: &mut CodePanelState) {
        state.viewport_height = area.height as usize;
        let Some(variant) = self.markups.get(self.active) else {
            let msg = format!("No {} markup available", self.active.label());
            buf.set_string(area.x, area.y, msg, Style::default().fg(self.theme.muted));
            return;
        };

        let lines = state
            .highlighted
            .entry(self.active)
            .or_insert_with(|| self.highlighter.highlight(self.active, variant.content()));
        let total = lines.len();

        let max_scroll = total.saturating_sub(area.height as usize);
        let scroll = state.scroll.get(&self.active).copied().unwrap_or(0).min(max_scroll);

        let gutter = if self.line_numbers {
            total.to_string().len() as u16 + 2
        } else {
            0
        };
        let gutter_style = Style::default().fg(self.theme.muted);
        let text_width = area.width.saturating_sub(gutter);

        for (row, (index, line)) in lines
            .iter()
            .enumerate()
            .skip(scroll)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + row as u16;
            if gutter > 0 {
                let number = format!("{:>width$} ", index + 1, width = gutter as usize - 1);
                buf.set_stringn(area.x, y, number, gutter as usize, gutter_style);
            }
            buf.set_line(area.x + gutter, y, line, text_width);
        }

        state.scroll.insert(self.active, scroll);
    }
}

static DEFAULT_ICONS: IconSet = IconSet::new(IconMode::Nerd);
static DEFAULT_BORDERS: BorderSet = BorderSet::new(IconMode::Nerd);

impl StatefulWidget for CodePanel<'_> {
    type State = CodePanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.panel.sync_selection(self.active);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_set(self.borders.normal())
            .border_style(Style::default().fg(self.theme.border));
        if let Some(title) = self.title {
            block = block
                .title(format!(" {title} "))
                .title_style(Style::default().fg(self.theme.subtext));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 || inner.width < 10 {
            state.tab_areas.clear();
            state.copy_area = Rect::default();
            state.download_area = Rect::default();
            return;
        }

        let header = Rect::new(inner.x, inner.y, inner.width, 1);
        let (download_area, copy_area) = self.render_actions(header, buf, state);
        state.copy_area = copy_area;
        state.download_area = download_area;

        let tabs_width = if download_area.width > 0 {
            download_area.x.saturating_sub(header.x + 1)
        } else {
            header.width
        };
        let tabs_area = Rect::new(header.x, header.y, tabs_width, 1);
        let titles: Vec<&str> = self.markups.iter().map(|v| v.language().label()).collect();
        let tabs = TabBar::new(titles, self.theme).select(self.markups.position(self.active));
        state.tab_areas = tabs.tab_areas(tabs_area);
        tabs.render(tabs_area, buf);

        let rule = Line::from(Span::styled(
            self.borders.rule().repeat(inner.width as usize),
            Style::default().fg(self.theme.border),
        ));
        buf.set_line(inner.x, inner.y + 1, &rule, inner.width);

        let content = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);
        self.render_pane(content, buf, state);
    }
}
