//! State machine behind the code preview panel.
//!
//! The panel never owns the active selection. The host keeps it and passes
//! it in; the panel only remembers which language it last saw so it can
//! drop the copied flag when the selection moves.
//!
//! Two counters keep asynchronous work honest:
//! - the selection epoch identifies the selection a copy was started for;
//!   a write that completes after the selection moved is stale.
//! - the reset generation is the token a scheduled reset must present;
//!   every successful copy and every selection change invalidates older
//!   tokens.

use crate::clipboard::ClipboardError;
use crate::download::DownloadArtifact;
use crate::markup::{Language, MarkupSet};
use tracing::{debug, warn};

/// Internal state of one panel instance.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    copied: bool,
    observed: Option<Language>,
    selection_epoch: u64,
    reset_generation: u64,
}

/// A clipboard write the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    /// Selection epoch the copy was started in.
    pub epoch: u64,
    pub language: Language,
    pub content: String,
}

/// Result of feeding a finished clipboard write back into the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The flag is now set; schedule a reset carrying `reset_token`.
    Copied { reset_token: u64 },
    /// The selection moved while the write was in flight.
    Stale,
    /// The write failed; the flag was left alone.
    Failed(ClipboardError),
}

/// Events produced by background work and consumed on the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// A clipboard write finished.
    CopyFinished {
        epoch: u64,
        language: Language,
        result: Result<(), ClipboardError>,
    },
    /// A scheduled reset fired.
    ResetCopied { token: u64 },
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a recent copy succeeded for the current selection.
    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn selection_epoch(&self) -> u64 {
        self.selection_epoch
    }

    pub fn generation(&self) -> u64 {
        self.reset_generation
    }

    /// The language seen by the last [`sync_selection`](Self::sync_selection).
    pub fn observed(&self) -> Option<Language> {
        self.observed
    }

    /// Note the host's current selection.
    ///
    /// Returns `true` when it changed, in which case the copied flag has
    /// been cleared and pending copies and resets are invalidated.
    pub fn sync_selection(&mut self, active: Language) -> bool {
        if self.observed == Some(active) {
            return false;
        }
        let first = self.observed.is_none();
        self.observed = Some(active);
        if first {
            return false;
        }
        self.copied = false;
        self.selection_epoch += 1;
        self.reset_generation += 1;
        debug!(language = %active, epoch = self.selection_epoch, "Selection changed");
        true
    }

    /// Handle a click on the tab at `index`.
    ///
    /// Forwards the tab's language to `set_active`; local state is not
    /// touched until the host's new selection is synced.
    pub fn select_tab(markups: &MarkupSet, index: usize, set_active: impl FnOnce(Language)) {
        if let Some(language) = markups.language_at(index) {
            set_active(language);
        }
    }

    /// Start a copy of the active variant.
    ///
    /// Returns `None` when the active language has no variant.
    pub fn begin_copy(&mut self, markups: &MarkupSet, active: Language) -> Option<CopyRequest> {
        self.sync_selection(active);
        let Some(variant) = markups.get(active) else {
            warn!(language = %active, "No markup variant to copy");
            return None;
        };
        debug!(language = %active, epoch = self.selection_epoch, "Copy started");
        Some(CopyRequest {
            epoch: self.selection_epoch,
            language: active,
            content: variant.content().to_string(),
        })
    }

    /// Feed back the result of a clipboard write started in `epoch`.
    pub fn complete_copy(&mut self, epoch: u64, result: Result<(), ClipboardError>) -> CopyOutcome {
        match result {
            Err(err) => {
                warn!(error = %err, "Copy failed");
                CopyOutcome::Failed(err)
            }
            Ok(()) if epoch != self.selection_epoch => {
                debug!(epoch, current = self.selection_epoch, "Ignoring stale copy");
                CopyOutcome::Stale
            }
            Ok(()) => {
                self.copied = true;
                self.reset_generation += 1;
                CopyOutcome::Copied {
                    reset_token: self.reset_generation,
                }
            }
        }
    }

    /// Clear the copied flag if `token` is still current.
    ///
    /// Returns `true` if the flag was cleared.
    pub fn reset_copied(&mut self, token: u64) -> bool {
        if token != self.reset_generation || !self.copied {
            return false;
        }
        self.copied = false;
        true
    }

    /// Build the download for the active variant.
    pub fn download(&self, markups: &MarkupSet, active: Language) -> Option<DownloadArtifact> {
        let artifact = markups.get(active).map(DownloadArtifact::for_variant);
        if artifact.is_none() {
            warn!(language = %active, "No markup variant to download");
        }
        artifact
    }

    /// Whether the copy and download actions have something to act on.
    pub fn actions_enabled(markups: &MarkupSet, active: Language) -> bool {
        markups.contains(active)
    }
}
