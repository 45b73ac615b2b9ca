//! Configuration management for comment-section

use crate::error::{CommentSectionError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text of the comment a fresh store starts with
pub const DEFAULT_SEED_TEXT: &str = "This is the first comment.";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store settings
    pub store: StoreConfig,
    /// Input validation settings
    pub input: InputConfig,
    /// Display settings
    pub display: DisplayConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Render configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CommentSectionError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load from an explicit path, or from the default location if present
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    debug!("No configuration at {:?}, using defaults", default_path);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Write configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml_string()?)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Default configuration file location
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "comment-section", "comment-section")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".comment-section")
                    .join("config.toml")
            })
    }

    fn check(&self) -> Result<()> {
        if self.input.max_length == 0 {
            return Err(CommentSectionError::Config(
                "input.max_length must be greater than zero".to_string(),
            ));
        }
        if self.display.timestamp_format.trim().is_empty() {
            return Err(CommentSectionError::Config(
                "display.timestamp_format cannot be empty".to_string(),
            ));
        }
        if !self.display.has_valid_timestamp_format() {
            return Err(CommentSectionError::Config(format!(
                "display.timestamp_format '{}' is not a valid strftime pattern",
                self.display.timestamp_format
            )));
        }
        Ok(())
    }
}

/// Store-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Start with a seed comment
    pub seed: bool,
    /// Text of the seed comment
    pub seed_text: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: true,
            seed_text: DEFAULT_SEED_TEXT.to_string(),
        }
    }
}

/// Input validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Accept blank comments and replies
    pub allow_empty: bool,
    /// Maximum text length in characters
    pub max_length: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            allow_empty: false,
            max_length: 2000,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime format for local timestamps
    pub timestamp_format: String,
    /// Show short IDs next to comments and replies
    pub show_ids: bool,
    /// Show reply counts in comment headers
    pub show_reply_count: bool,
}

impl DisplayConfig {
    /// Whether every specifier in the timestamp format is understood
    pub fn has_valid_timestamp_format(&self) -> bool {
        StrftimeItems::new(&self.timestamp_format).all(|item| !matches!(item, Item::Error))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            show_ids: false,
            show_reply_count: true,
        }
    }
}
