//! Status bar widget for the top of the TUI.
//!
//! Format: `● mailview │ source │ HTML │ 42 lines │ ✓ copied`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{IconSet, Theme};

/// Status bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    /// Where the markup came from (directory or file).
    pub source: Option<String>,
    /// Label of the active tab.
    pub language: String,
    /// Line count of the active variant.
    pub lines: Option<usize>,
    /// Whether the copied indicator is on.
    pub copied: bool,
}

impl StatusBarContent {
    /// Create a "terminal too small" warning.
    pub fn too_small() -> Self {
        Self {
            source: None,
            language: "Terminal too small".into(),
            lines: None,
            copied: false,
        }
    }
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
    icons: &'a IconSet,
}

impl<'a> StatusBar<'a> {
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            content,
            theme,
            icons,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sep = format!(" {} ", self.icons.separator());
        let sep_style = Style::default().fg(self.theme.muted);

        let mut spans = vec![
            Span::styled(
                format!("{} ", self.icons.bullet()),
                Style::default().fg(self.theme.primary),
            ),
            Span::styled("mailview", Style::default().fg(self.theme.text)),
        ];

        if let Some(ref source) = self.content.source {
            spans.push(Span::styled(sep.clone(), sep_style));
            spans.push(Span::styled(source, Style::default().fg(self.theme.subtext)));
        }

        spans.push(Span::styled(sep.clone(), sep_style));
        spans.push(Span::styled(
            &self.content.language,
            Style::default().fg(self.theme.primary),
        ));

        if let Some(lines) = self.content.lines {
            spans.push(Span::styled(sep.clone(), sep_style));
            let noun = if lines == 1 { "line" } else { "lines" };
            spans.push(Span::styled(
                format!("{lines} {noun}"),
                Style::default().fg(self.theme.info),
            ));
        }

        if self.content.copied {
            spans.push(Span::styled(sep, sep_style));
            spans.push(Span::styled(
                format!("{} copied", self.icons.check()),
                Style::default().fg(self.theme.success),
            ));
        }

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}
