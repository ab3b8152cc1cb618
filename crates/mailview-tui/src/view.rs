//! Screen composition: status bar, code panel, footer and overlays.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::App;
use crate::layout::{centered_fixed, is_too_small, main_layout, MIN_HEIGHT, MIN_WIDTH};
use crate::widgets::{Footer, StatusBar, StatusBarContent};

/// Draw the whole screen.
pub fn draw(app: &mut App, area: Rect, buf: &mut Buffer) {
    if is_too_small(area) {
        render_too_small(app, area, buf);
        return;
    }

    let (status_area, panel_area, footer_area) = main_layout(area);

    app.render_panel(panel_area, buf);

    let status = app.status_content();
    StatusBar::new(&status, &app.theme, &app.icons).render(status_area, buf);

    let hints = Footer::default_hints();
    Footer::new(&hints, &app.theme)
        .message(app.footer_message())
        .render(footer_area, buf);

    if app.show_help {
        render_help_overlay(app, area, buf);
    }
}

fn render_too_small(app: &App, area: Rect, buf: &mut Buffer) {
    let content = StatusBarContent::too_small();
    let status_area = Rect::new(area.x, area.y, area.width, area.height.min(1));
    StatusBar::new(&content, &app.theme, &app.icons).render(status_area, buf);
    if area.height > 1 {
        let msg = format!("Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}");
        buf.set_stringn(
            area.x,
            area.y + 1,
            msg,
            area.width as usize,
            Style::default().fg(app.theme.warning),
        );
    }
}

/// Render the help overlay.
pub fn render_help_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    let key = Style::default().fg(app.theme.primary);
    let text = Style::default().fg(app.theme.text);
    let heading = Style::default()
        .fg(app.theme.secondary)
        .add_modifier(Modifier::BOLD);

    let rows: &[(&str, &str)] = &[
        ("Tab / l / Right", "Next tab"),
        ("S-Tab / h / Left", "Previous tab"),
        ("1-3", "Jump to tab"),
        ("c / y", "Copy to clipboard"),
        ("d / s", "Download file"),
        ("j/k, PgUp/PgDn", "Scroll"),
        ("g / G", "Top / bottom"),
        ("Esc / q", "Quit"),
        ("?", "Toggle this help"),
    ];

    let mut lines = vec![Line::from(Span::styled("  Keys", heading))];
    lines.extend(rows.iter().map(|(k, action)| {
        Line::from(vec![
            Span::styled(format!("    {k:<18}"), key),
            Span::styled(*action, text),
        ])
    }));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "  Mouse: click tabs and buttons, wheel scrolls",
        Style::default().fg(app.theme.subtext),
    )));
    lines.push(Line::from(Span::styled(
        "  [Press any key to close]",
        Style::default().fg(app.theme.muted),
    )));

    let width = 52.min(area.width.saturating_sub(4));
    let height = 16.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(app.theme.primary).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_set(app.borders.focused())
        .border_style(Style::default().fg(app.theme.border_focused))
        .style(Style::default().bg(app.theme.base));

    Paragraph::new(lines).block(block).render(overlay_area, buf);
}

#[cfg(test)]
mod tests {
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_app_to_string};

    #[test]
    fn test_main_screen_parts() {
        let mut app = create_test_app();
        let screen = render_app_to_string(&mut app, 80, 24);
        assert!(screen.contains("mailview"));
        assert!(screen.contains("[1] React"));
        assert!(screen.contains("[2] HTML"));
        assert!(screen.contains("[3] Plain Text"));
        assert!(screen.contains("Copy"));
        assert!(screen.contains("Download"));
        assert!(screen.contains("[q] quit"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        let screen = render_app_to_string(&mut app, 80, 24);
        assert!(screen.contains("Help"));
        assert!(screen.contains("Toggle this help"));
    }

    #[test]
    fn test_too_small() {
        let mut app = create_test_app();
        let screen = render_app_to_string(&mut app, 36, 6);
        assert!(screen.contains("Terminal too small"));
        assert!(screen.contains("Resize to at least 40x8"));
    }

    #[test]
    fn test_hover_shows_tooltip() {
        let mut app = create_test_app();
        let screen = render_app_to_string(&mut app, 80, 24);
        let row = screen
            .lines()
            .position(|l| l.contains("[1] React"))
            .unwrap();
        let line = screen.lines().nth(row).unwrap();
        let col = line.chars().position(|c| c == 'C').unwrap();

        app.handle_action(Action::Hover(
            u16::try_from(col).unwrap(),
            u16::try_from(row).unwrap(),
        ));
        let screen = render_app_to_string(&mut app, 80, 24);
        assert!(screen.contains("Copy to Clipboard"));
    }
}
