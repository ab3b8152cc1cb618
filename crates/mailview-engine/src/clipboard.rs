//! Clipboard abstraction.
//!
//! Writes are blocking and fallible; callers run them off the UI loop
//! (see [`crate::copy::spawn_copy`]).

use std::sync::{Arc, Mutex};

/// A destination for copied text.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Errors writing to a clipboard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, no display, ...).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard was opened but the write failed.
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// In-process clipboard that records every write.
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
    failure: Option<ClipboardError>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail with `error`.
    pub fn failing(error: ClipboardError) -> Self {
        Self {
            writes: Arc::default(),
            failure: Some(error),
        }
    }

    /// Every successfully written text, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    /// The most recent successful write.
    pub fn last(&self) -> Option<String> {
        self.writes().pop()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.writes
            .lock()
            .map_err(|_| ClipboardError::Write("clipboard history poisoned".into()))?
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_writes() {
        let clipboard = MemoryClipboard::new();
        clipboard.write_text("one").unwrap();
        clipboard.write_text("two").unwrap();
        assert_eq!(clipboard.writes(), vec!["one", "two"]);
        assert_eq!(clipboard.last().as_deref(), Some("two"));
    }

    #[test]
    fn test_clones_share_history() {
        let clipboard = MemoryClipboard::new();
        let other = clipboard.clone();
        other.write_text("shared").unwrap();
        assert_eq!(clipboard.last().as_deref(), Some("shared"));
    }

    #[test]
    fn test_failing_clipboard() {
        let clipboard = MemoryClipboard::failing(ClipboardError::Unavailable("no display".into()));
        let err = clipboard.write_text("x").unwrap_err();
        assert_eq!(err.to_string(), "clipboard unavailable: no display");
        assert!(clipboard.writes().is_empty());
    }
}
