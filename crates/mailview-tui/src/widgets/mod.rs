//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`CodePanel`] - Tabbed code preview with copy and download buttons
//! - [`TabBar`] - Numbered tab row
//! - [`StatusBar`] - Top status bar with source and active language
//! - [`Footer`] - Bottom key hints, tooltips and notifications

mod code_panel;
mod footer;
mod status_bar;
mod tabs;

pub use code_panel::{CodePanel, CodePanelState, PanelHit};
pub use footer::{Footer, KeyHint, MessageKind};
pub use status_bar::{StatusBar, StatusBarContent};
pub use tabs::TabBar;
