//! Asynchronous clipboard writes and the copied-flag reset timer.
//!
//! Both report back through an unbounded [`PanelEvent`] channel that the UI
//! loop drains, so panel state is only ever mutated on the loop itself.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::panel::{CopyRequest, PanelEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

/// Default lifetime of the copied flag.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// Run a clipboard write on the blocking pool.
///
/// The result arrives as [`PanelEvent::CopyFinished`]. A write task that
/// panics is reported as a failed write.
pub fn spawn_copy(
    clipboard: Arc<dyn Clipboard>,
    request: CopyRequest,
    tx: mpsc::UnboundedSender<PanelEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let CopyRequest {
            epoch,
            language,
            content,
        } = request;

        let result = tokio::task::spawn_blocking(move || clipboard.write_text(&content))
            .await
            .unwrap_or_else(|e| Err(ClipboardError::Write(e.to_string())));

        debug!(%language, epoch, ok = result.is_ok(), "Clipboard write finished");
        // Receiver gone means the UI has shut down.
        let _ = tx.send(PanelEvent::CopyFinished {
            epoch,
            language,
            result,
        });
    })
}

/// One-shot, cancellable reset of the copied flag.
///
/// Scheduling a new reset aborts the previous one. Dropping the timer
/// aborts whatever is pending.
#[derive(Debug, Default)]
pub struct ResetTimer {
    pending: Option<AbortHandle>,
}

impl ResetTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send [`PanelEvent::ResetCopied`] with `token` after `delay`.
    pub fn schedule(&mut self, token: u64, delay: Duration, tx: mpsc::UnboundedSender<PanelEvent>) {
        self.cancel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(PanelEvent::ResetCopied { token });
        });
        self.pending = Some(handle.abort_handle());
    }

    /// Abort the pending reset, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a reset is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ResetTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
