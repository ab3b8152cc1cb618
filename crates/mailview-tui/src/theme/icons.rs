//! Icon sets for Nerd Fonts, Unicode, and ASCII fallback.

use mailview_engine::IconStyle;

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Nerd Font icons (default, richest experience).
    #[default]
    Nerd,
    /// Standard Unicode symbols (wide compatibility).
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

impl From<IconStyle> for IconMode {
    fn from(style: IconStyle) -> Self {
        match style {
            IconStyle::Nerd => Self::Nerd,
            IconStyle::Unicode => Self::Unicode,
            IconStyle::Ascii => Self::Ascii,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    pub const fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    // === Action Icons ===

    pub fn clipboard(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰅍",
            IconMode::Unicode => "⧉",
            IconMode::Ascii => "[c]",
        }
    }

    pub fn check(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰄬",
            IconMode::Unicode => "✓",
            IconMode::Ascii => "[x]",
        }
    }

    pub fn download(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd => "󰇚",
            IconMode::Unicode => "⤓",
            IconMode::Ascii => "[d]",
        }
    }

    // === Status Icons ===

    pub fn bullet(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "●",
            IconMode::Ascii => "*",
        }
    }

    pub fn separator(&self) -> &'static str {
        match self.mode {
            IconMode::Nerd | IconMode::Unicode => "│",
            IconMode::Ascii => "|",
        }
    }
}
