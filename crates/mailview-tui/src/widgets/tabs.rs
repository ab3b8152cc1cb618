//! Tab bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

const SEPARATOR: &str = " | ";

/// A horizontal tab bar with numbered tabs.
#[derive(Debug, Clone)]
pub struct TabBar<'a> {
    titles: Vec<&'a str>,
    selected: Option<usize>,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(titles: Vec<&'a str>, theme: &'a Theme) -> Self {
        Self {
            titles,
            selected: None,
            theme,
        }
    }

    /// Set the selected tab index.
    #[must_use]
    pub fn select(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    fn label(index: usize, title: &str) -> String {
        format!("[{}] {title}", index + 1)
    }

    /// Screen area of each tab when drawn into `area`.
    ///
    /// Tabs that do not fit get a zero-width rect.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tab_areas(&self, area: Rect) -> Vec<Rect> {
        let right = area.x.saturating_add(area.width);
        let mut x = area.x;
        let mut areas = Vec::with_capacity(self.titles.len());
        for (i, title) in self.titles.iter().enumerate() {
            if i > 0 {
                x = x.saturating_add(SEPARATOR.width() as u16).min(right);
            }
            let width = (Self::label(i, title).width() as u16).min(right - x);
            areas.push(Rect::new(x, area.y, width, area.height.min(1)));
            x = x.saturating_add(width);
        }
        areas
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let separator = Style::default().fg(self.theme.muted);
        let inactive = Style::default().fg(self.theme.subtext);
        let active = Style::default()
            .fg(self.theme.primary)
            .bg(self.theme.surface)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for (i, title) in self.titles.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, separator));
            }
            let style = if Some(i) == self.selected {
                active
            } else {
                inactive
            };
            spans.push(Span::styled(Self::label(i, title), style));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
