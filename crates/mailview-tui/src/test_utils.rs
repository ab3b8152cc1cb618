//! Test utilities for mailview-tui snapshot and integration testing.

use crate::app::{App, AppOptions};
use crate::view;
use mailview_engine::{Config, IconStyle, Language, MarkupSet, MarkupVariant, MemoryClipboard};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::sync::Arc;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

pub const SAMPLE_JSX: &str = r#"import { Button, Html } from "@react-email/components";

export default function Email() {
  return (
    <Html>
      <Button href="https://example.com">Click me</Button>
    </Html>
  );
}"#;

pub const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <body>
    <a href="https://example.com" style="padding:12px">Click me</a>
  </body>
</html>"#;

pub const SAMPLE_TEXT: &str = "Click me [https://example.com]";

/// All three variants in tab order.
pub fn sample_markups() -> MarkupSet {
    MarkupSet::new(vec![
        MarkupVariant::new(Language::Jsx, SAMPLE_JSX),
        MarkupVariant::new(Language::Markup, SAMPLE_HTML),
        MarkupVariant::new(Language::Markdown, SAMPLE_TEXT),
    ])
    .expect("sample markups are valid")
}

/// Config with ASCII icons so rendered output does not depend on `NO_COLOR`.
pub fn test_config() -> Config {
    Config {
        icons: IconStyle::Ascii,
        ..Config::default()
    }
}

/// Create a test app with the sample markup and an in-memory clipboard.
pub fn create_test_app() -> App {
    create_test_app_with(sample_markups(), test_config()).0
}

/// Create a test app, returning the clipboard it writes to.
pub fn create_test_app_with(markups: MarkupSet, config: Config) -> (App, MemoryClipboard) {
    let clipboard = MemoryClipboard::new();
    let options = AppOptions::new(config, Arc::new(clipboard.clone()));
    (App::new(markups, options), clipboard)
}

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
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

/// Draw the app on a test terminal and return the screen as text.
pub fn render_app_to_string(app: &mut App, width: u16, height: u16) -> String {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal
        .draw(|frame| {
            let area = frame.area();
            view::draw(app, area, frame.buffer_mut());
        })
        .expect("draw succeeds");
    buffer_to_string(terminal.backend().buffer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_sample_markups_order() {
        let markups = sample_markups();
        assert_eq!(
            markups.languages(),
            vec![Language::Jsx, Language::Markup, Language::Markdown]
        );
    }

    #[test]
    fn test_buffer_to_string() {
        let area = ratatui::layout::Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
