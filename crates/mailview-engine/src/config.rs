//! Configuration for mailview.
//!
//! Stored as JSON at `.mailview/config.json`. Every field has a default so
//! partial files are accepted.

use crate::markup::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Directory holding mailview state, relative to the working directory.
pub const CONFIG_DIR: &str = ".mailview";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Floor for `tick_rate_ms`; a zero rate would spin the event thread.
pub const MIN_TICK_RATE_MS: u64 = 16;

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How long the copied indicator stays on, in milliseconds.
    #[serde(default = "default_copied_reset_ms")]
    pub copied_reset_ms: u64,

    /// Directory downloads are saved into.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Tab selected on startup (falls back to the first available).
    #[serde(default = "default_language")]
    pub default_language: Language,

    /// UI tick rate in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// How many ticks a notification stays visible.
    #[serde(default = "default_notification_ticks")]
    pub notification_ticks: usize,

    /// Icon style.
    #[serde(default)]
    pub icons: IconStyle,

    /// Whether to draw the line-number gutter.
    #[serde(default = "default_line_numbers")]
    pub line_numbers: bool,
}

fn default_copied_reset_ms() -> u64 {
    3000
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_language() -> Language {
    Language::Jsx
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_notification_ticks() -> usize {
    // ~3 seconds at the default 4 Hz tick rate
    12
}

fn default_line_numbers() -> bool {
    true
}

/// Icon style for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    /// Nerd Font glyphs.
    #[default]
    Nerd,
    /// Plain Unicode symbols.
    Unicode,
    /// ASCII only.
    Ascii,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            copied_reset_ms: default_copied_reset_ms(),
            download_dir: default_download_dir(),
            default_language: default_language(),
            tick_rate_ms: default_tick_rate_ms(),
            notification_ticks: default_notification_ticks(),
            icons: IconStyle::default(),
            line_numbers: default_line_numbers(),
        }
    }
}

impl Config {
    /// Path of the config file under `root`.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, using defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    pub fn copied_reset_delay(&self) -> Duration {
        Duration::from_millis(self.copied_reset_ms)
    }

    /// Tick rate with [`MIN_TICK_RATE_MS`] applied.
    pub fn effective_tick_rate_ms(&self) -> u64 {
        self.tick_rate_ms.max(MIN_TICK_RATE_MS)
    }

    /// Icon style after applying `NO_COLOR`.
    pub fn effective_icons(&self) -> IconStyle {
        if std::env::var_os("NO_COLOR").is_some() {
            IconStyle::Ascii
        } else {
            self.icons
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.copied_reset_ms, 3000);
        assert_eq!(config.copied_reset_delay(), Duration::from_secs(3));
        assert_eq!(config.default_language, Language::Jsx);
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert!(config.line_numbers);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config =
            serde_json::from_str(r#"{"copied_reset_ms": 500, "icons": "ascii"}"#).unwrap();
        assert_eq!(parsed.copied_reset_ms, 500);
        assert_eq!(parsed.icons, IconStyle::Ascii);
        assert_eq!(parsed.tick_rate_ms, 250);
        assert_eq!(parsed.default_language, Language::Jsx);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = Config::path_in(dir.path());
        let config = Config {
            default_language: Language::Markdown,
            download_dir: PathBuf::from("out"),
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert!(path.ends_with(".mailview/config.json"));

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&Config::path_in(dir.path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let parsed: Config = serde_json::from_str(r#"{"tick_rate_ms": 0}"#).unwrap();
        assert_eq!(parsed.effective_tick_rate_ms(), MIN_TICK_RATE_MS);
        assert_eq!(Config::default().effective_tick_rate_ms(), 250);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"default_language": "amp"}"#);
        assert!(result.is_err());
    }
}
