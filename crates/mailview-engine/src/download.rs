//! Downloadable file artifacts built from markup variants.

use crate::markup::MarkupVariant;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base name of every downloaded file.
pub const DOWNLOAD_STEM: &str = "email";

/// An in-memory file ready to be saved.
///
/// The artifact owns its contents; saving writes them out and the caller
/// drops the artifact afterwards, so no handle outlives the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    file_name: String,
    contents: String,
}

impl DownloadArtifact {
    /// Build the artifact for a variant: `email.<ext>` with the exact content.
    pub fn for_variant(variant: &MarkupVariant) -> Self {
        Self {
            file_name: format!("{DOWNLOAD_STEM}.{}", variant.language().extension()),
            contents: variant.content().to_string(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }

    /// Write the artifact into `dir`, creating the directory if needed.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, DownloadError> {
        std::fs::create_dir_all(dir).map_err(|source| DownloadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.bytes()).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.contents.len(), "Saved download");
        Ok(path)
    }
}

/// Errors saving a download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Writing the file or creating its directory failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
