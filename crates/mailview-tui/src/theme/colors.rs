//! Catppuccin Mocha color palette for the TUI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Syntax
    pub keyword: Color,
    pub string: Color,
    pub comment: Color,
    pub tag: Color,
    pub attribute: Color,
    pub number: Color,
    pub link: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244
            overlay: Color::Rgb(69, 71, 90),    // #45475a

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            // Semantic
            success: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
            warning: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            error: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
            info: Color::Rgb(137, 180, 250),    // #89b4fa (blue)

            // Syntax
            keyword: Color::Rgb(203, 166, 247),   // #cba6f7 (mauve)
            string: Color::Rgb(166, 227, 161),    // #a6e3a1 (green)
            comment: Color::Rgb(127, 132, 156),   // #7f849c (overlay1)
            tag: Color::Rgb(137, 180, 250),       // #89b4fa (blue)
            attribute: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            number: Color::Rgb(250, 179, 135),    // #fab387 (peach)
            link: Color::Rgb(116, 199, 236),      // #74c7ec (sapphire)

            // Borders
            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mocha() {
        let theme = Theme::default();
        assert!(matches!(theme.base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_syntax_colors_are_distinct_from_text() {
        let theme = Theme::mocha();
        for color in [theme.keyword, theme.comment, theme.tag, theme.attribute] {
            assert_ne!(color, theme.text);
        }
    }
}
