//! Footer widget.
//!
//! Format: `tooltip or notification            [c] copy │ [d] download │ [?] help`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key or key combination (e.g., "Tab", "Ctrl+C").
    pub key: String,
    /// The action description (e.g., "copy", "quit").
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Severity of a footer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
    Tooltip,
}

/// Footer with a message on the left and key hints on the right.
pub struct Footer<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    message: Option<(&'a str, MessageKind)>,
}

impl<'a> Footer<'a> {
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            message: None,
        }
    }

    /// Set the message shown on the left.
    #[must_use]
    pub fn message(mut self, message: Option<(&'a str, MessageKind)>) -> Self {
        self.message = message;
        self
    }

    /// Hints for the main preview screen.
    pub fn default_hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("c", "copy"),
            KeyHint::new("d", "download"),
            KeyHint::new("?", "help"),
            KeyHint::new("q", "quit"),
        ]
    }

    fn message_style(&self, kind: MessageKind) -> Style {
        let color = match kind {
            MessageKind::Info => self.theme.info,
            MessageKind::Success => self.theme.success,
            MessageKind::Error => self.theme.error,
            MessageKind::Tooltip => self.theme.secondary,
        };
        Style::default().fg(color)
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = Vec::new();
        let mut right_spans = Vec::new();

        if let Some((text, kind)) = self.message {
            left_spans.push(Span::styled(text, self.message_style(kind)));
        }

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(" │ ", Style::default().fg(self.theme.muted)));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.key, Style::default().fg(self.theme.primary)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(&hint.action, Style::default().fg(self.theme.subtext)));
        }

        let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
        let total_width = area.width as usize;

        // Hints give way to the message when space runs out.
        if left_width + right_width + 1 > total_width {
            right_spans.clear();
        } else {
            let padding = total_width - left_width - right_width;
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        let paragraph =
            Paragraph::new(Line::from(left_spans)).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use insta::assert_snapshot;

    fn render(hints: &[KeyHint], message: Option<(&str, MessageKind)>, width: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        Footer::new(hints, &theme)
            .message(message)
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_hints_right_aligned() {
        let hints = vec![KeyHint::new("c", "copy"), KeyHint::new("?", "help")];
        let text = render(&hints, None, 30);
        assert_snapshot!(text.trim_start(), @"[c] copy │ [?] help");
        assert_eq!(text.chars().count(), 30);
    }

    #[test]
    fn test_tooltip_on_left() {
        let hints = vec![KeyHint::new("q", "quit")];
        let text = render(&hints, Some(("Copy to Clipboard", MessageKind::Tooltip)), 40);
        assert!(text.starts_with("Copy to Clipboard"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn test_message_wins_when_narrow() {
        let hints = Footer::default_hints();
        let text = render(&hints, Some(("Saved email.html", MessageKind::Success)), 24);
        assert_eq!(text, "Saved email.html");
    }

    #[test]
    fn test_default_hints_cover_actions() {
        let hints = Footer::default_hints();
        let keys: Vec<&str> = hints.iter().map(|h| h.key.as_str()).collect();
        assert!(keys.contains(&"c"));
        assert!(keys.contains(&"d"));
        assert!(keys.contains(&"q"));
    }
}
