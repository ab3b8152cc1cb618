//! Markup variants and the closed set of languages they are written in.
//!
//! An email build produces the same message in several representations.
//! Each one is a [`MarkupVariant`]; a [`MarkupSet`] holds the ordered,
//! de-duplicated collection shown by the preview panel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used when a raw tag does not name a known language.
pub const FALLBACK_LABEL: &str = "Text";

/// Languages a markup variant can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Component source.
    Jsx,
    /// Rendered HTML.
    Markup,
    /// Plain-text fallback.
    Markdown,
}

impl Language {
    /// Every supported language, in canonical tab order.
    pub const ALL: [Language; 3] = [Language::Jsx, Language::Markup, Language::Markdown];

    /// The tag used in configuration and on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Jsx => "jsx",
            Self::Markup => "markup",
            Self::Markdown => "markdown",
        }
    }

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Jsx => "React",
            Self::Markup => "HTML",
            Self::Markdown => "Plain Text",
        }
    }

    /// File extension used for downloads.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jsx => "jsx",
            Self::Markup => "html",
            Self::Markdown => "txt",
        }
    }

    /// Look up the display label for a raw tag.
    ///
    /// Unknown tags get [`FALLBACK_LABEL`].
    pub fn label_for_tag(tag: &str) -> &'static str {
        tag.parse::<Language>()
            .map_or(FALLBACK_LABEL, Language::label)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsx" | "tsx" | "react" | "source" => Ok(Self::Jsx),
            "markup" | "html" | "htm" => Ok(Self::Markup),
            "markdown" | "md" | "txt" | "text" | "plain" | "plain text" => Ok(Self::Markdown),
            _ => Err(MarkupError::UnknownLanguage(s.to_string())),
        }
    }
}

/// One textual representation of an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupVariant {
    language: Language,
    content: String,
}

impl MarkupVariant {
    /// Create a new variant.
    pub fn new(language: Language, content: impl Into<String>) -> Self {
        Self {
            language,
            content: content.into(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of lines, counting an empty variant as one line.
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }
}

/// Ordered collection of variants with unique languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSet {
    variants: Vec<MarkupVariant>,
}

impl MarkupSet {
    /// Build a set, rejecting empty input and duplicate languages.
    pub fn new(variants: Vec<MarkupVariant>) -> Result<Self, MarkupError> {
        if variants.is_empty() {
            return Err(MarkupError::Empty);
        }
        for (i, variant) in variants.iter().enumerate() {
            if variants[..i]
                .iter()
                .any(|v| v.language == variant.language)
            {
                return Err(MarkupError::DuplicateLanguage(variant.language));
            }
        }
        Ok(Self { variants })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarkupVariant> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always false: a set holds at least one variant.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Languages in tab order.
    pub fn languages(&self) -> Vec<Language> {
        self.variants.iter().map(MarkupVariant::language).collect()
    }

    pub fn first(&self) -> &MarkupVariant {
        &self.variants[0]
    }

    pub fn get(&self, language: Language) -> Option<&MarkupVariant> {
        self.variants.iter().find(|v| v.language == language)
    }

    pub fn contains(&self, language: Language) -> bool {
        self.get(language).is_some()
    }

    pub fn position(&self, language: Language) -> Option<usize> {
        self.variants.iter().position(|v| v.language == language)
    }

    pub fn language_at(&self, index: usize) -> Option<Language> {
        self.variants.get(index).map(MarkupVariant::language)
    }

    /// Return `requested` if the set has it, otherwise the first language.
    pub fn resolve_active(&self, requested: Language) -> Language {
        if self.contains(requested) {
            requested
        } else {
            self.first().language
        }
    }

    /// The language after `current`, wrapping around.
    pub fn next_language(&self, current: Language) -> Language {
        let next = self
            .position(current)
            .map_or(0, |i| (i + 1) % self.variants.len());
        self.variants[next].language
    }

    /// The language before `current`, wrapping around.
    pub fn prev_language(&self, current: Language) -> Language {
        let len = self.variants.len();
        let prev = self.position(current).map_or(0, |i| (i + len - 1) % len);
        self.variants[prev].language
    }
}

impl<'a> IntoIterator for &'a MarkupSet {
    type Item = &'a MarkupVariant;
    type IntoIter = std::slice::Iter<'a, MarkupVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Errors building a markup set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    /// No variants were supplied.
    #[error("no markup variants supplied")]
    Empty,

    /// Two variants share a language.
    #[error("duplicate markup variant for language '{0}'")]
    DuplicateLanguage(Language),

    /// A string did not name a supported language.
    #[error("unknown markup language '{0}' (expected jsx, markup or markdown)")]
    UnknownLanguage(String),
}
