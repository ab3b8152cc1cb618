//! Locating generated email markup on disk.

use crate::markup::{Language, MarkupError, MarkupSet, MarkupVariant};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File names tried for each language, in preference order.
pub const CANDIDATES: [(Language, &[&str]); 3] = [
    (Language::Jsx, &["email.jsx", "email.tsx"]),
    (Language::Markup, &["email.html", "email.markup"]),
    (Language::Markdown, &["email.txt", "email.md", "email.markdown"]),
];

/// Where one variant was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSource {
    pub language: Language,
    pub path: PathBuf,
}

/// Find the markup files present in `dir`.
pub fn discover_sources(dir: &Path) -> Vec<MarkupSource> {
    CANDIDATES
        .iter()
        .filter_map(|(language, names)| {
            names
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
                .map(|path| MarkupSource {
                    language: *language,
                    path,
                })
        })
        .collect()
}

/// Read the given sources, in order, into a markup set.
pub fn load_sources(sources: &[MarkupSource]) -> Result<MarkupSet, DiscoveryError> {
    let mut variants = Vec::with_capacity(sources.len());
    for source in sources {
        let content = std::fs::read_to_string(&source.path).map_err(|e| DiscoveryError::Io {
            path: source.path.clone(),
            source: e,
        })?;
        debug!(
            language = %source.language,
            path = %source.path.display(),
            bytes = content.len(),
            "Loaded markup"
        );
        variants.push(MarkupVariant::new(source.language, content));
    }
    Ok(MarkupSet::new(variants)?)
}

/// Discover and load every variant in `dir`.
pub fn load_dir(dir: &Path) -> Result<MarkupSet, DiscoveryError> {
    let sources = discover_sources(dir);
    if sources.is_empty() {
        return Err(DiscoveryError::NoMarkup(dir.to_path_buf()));
    }
    load_sources(&sources)
}

/// Errors loading markup from disk.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A markup file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory held none of the expected files.
    #[error("no email markup found in {} (expected email.jsx, email.html or email.txt)", .0.display())]
    NoMarkup(PathBuf),

    /// The files did not form a valid set.
    #[error(transparent)]
    Markup(#[from] MarkupError),
}
