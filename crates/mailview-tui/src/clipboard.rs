//! System clipboard backed by `arboard`.
//!
//! On Linux (X11 and Wayland) the process that set the clipboard serves its
//! contents to other apps, and they may vanish once the last `arboard`
//! handle is dropped. The handle is therefore opened once and kept for as
//! long as the [`SystemClipboard`] lives.

use mailview_engine::{Clipboard, ClipboardError};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Something text can be written into.
trait TextTarget {
    fn put(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl TextTarget for arboard::Clipboard {
    fn put(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set_text(text.to_owned()).map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

type Opener<T> = Box<dyn Fn() -> Result<T, ClipboardError> + Send + Sync>;

/// A lazily opened handle kept between writes.
///
/// A failed write drops the handle so the next write reopens it.
struct Held<T> {
    open: Opener<T>,
    handle: Mutex<Option<T>>,
}

impl<T: TextTarget> Held<T> {
    fn new(open: Opener<T>) -> Self {
        Self {
            open,
            handle: Mutex::new(None),
        }
    }

    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut slot = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        let mut handle = match slot.take() {
            Some(handle) => handle,
            None => (self.open)()?,
        };
        handle.put(text)?;
        *slot = Some(handle);
        Ok(())
    }
}

fn open_system() -> Result<arboard::Clipboard, ClipboardError> {
    arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

/// Writes to the desktop clipboard.
pub struct SystemClipboard {
    inner: Held<arboard::Clipboard>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            inner: Held::new(Box::new(open_system)),
        }
    }

    /// Set the clipboard from a short-lived process.
    ///
    /// On Linux this blocks until another app takes over the clipboard, so
    /// the text stays available after the caller would otherwise exit.
    pub fn serve_text(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = open_system()?;

        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            clipboard
                .set()
                .wait()
                .text(text.to_owned())
                .map_err(|e| ClipboardError::Write(e.to_string()))?;
        }

        #[cfg(not(target_os = "linux"))]
        clipboard.put(text)?;

        debug!(bytes = text.len(), "Served system clipboard");
        Ok(())
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.inner.write(text)?;
        debug!(bytes = text.len(), "Wrote system clipboard");
        Ok(())
    }
}
