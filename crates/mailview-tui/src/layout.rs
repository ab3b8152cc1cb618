//! Layout helpers for the mailview TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Smallest terminal the full layout is drawn in.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 8;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Split the screen into status bar, panel and footer.
pub fn main_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Whether `area` is too small for the main layout.
pub fn is_too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_fixed(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_fixed(40, 10, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }

    #[test]
    fn test_main_layout() {
        let (status, panel, footer) = main_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(status, Rect::new(0, 0, 80, 1));
        assert_eq!(panel, Rect::new(0, 1, 80, 22));
        assert_eq!(footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_too_small() {
        assert!(is_too_small(Rect::new(0, 0, 30, 24)));
        assert!(is_too_small(Rect::new(0, 0, 80, 5)));
        assert!(!is_too_small(Rect::new(0, 0, 80, 24)));
    }
}
