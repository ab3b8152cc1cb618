//! mailview-engine: Headless core of the mailview email markup previewer
//!
//! This crate provides everything that does not touch the terminal:
//! - Markup variants and the closed set of languages
//! - The code panel state machine (copied flag, selection epochs)
//! - Asynchronous clipboard writes and the cancellable reset timer
//! - Download artifacts
//! - Discovery of generated markup files and configuration

pub mod clipboard;
pub mod config;
pub mod copy;
pub mod discovery;
pub mod download;
pub mod markup;
pub mod panel;

// Re-export commonly used types
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use config::{Config, ConfigError, IconStyle};
pub use copy::{spawn_copy, ResetTimer, DEFAULT_RESET_DELAY};
pub use discovery::{discover_sources, load_dir, load_sources, DiscoveryError, MarkupSource};
pub use download::{DownloadArtifact, DownloadError};
pub use markup::{Language, MarkupError, MarkupSet, MarkupVariant};
pub use panel::{CopyOutcome, CopyRequest, PanelEvent, PanelState};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
