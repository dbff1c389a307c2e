//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application config.

use jokebook_application::RevealConfig;
use jokebook_application::config::reveal_config::DEFAULT_COUNTDOWN_SECONDS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("reveal.tick_interval_ms cannot be 0")]
    ZeroTickInterval,

    #[error("archive.path cannot be empty")]
    EmptyArchivePath,
}

/// Raw reveal configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRevealConfig {
    /// Value of the first countdown tick
    pub countdown_seconds: u32,
    /// Milliseconds between countdown ticks
    pub tick_interval_ms: u64,
}

impl Default for FileRevealConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval_ms: 1000,
        }
    }
}

/// Raw archive configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArchiveConfig {
    /// Append told jokes to a JSONL file
    pub enabled: bool,
    /// Archive file path; `~/` is expanded
    pub path: Option<String>,
}

impl Default for FileArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show the countdown as a progress bar
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_progress: true,
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub reveal: FileRevealConfig,
    pub archive: FileArchiveConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.reveal.tick_interval_ms == 0 {
            return Err(ConfigValidationError::ZeroTickInterval);
        }
        if let Some(path) = &self.archive.path
            && path.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyArchivePath);
        }
        Ok(())
    }

    /// Convert into the application-level reveal parameters
    pub fn reveal_config(&self) -> RevealConfig {
        RevealConfig::default()
            .with_countdown_seconds(self.reveal.countdown_seconds)
            .with_tick_interval(Duration::from_millis(self.reveal.tick_interval_ms))
    }

    /// Resolved archive file path, or `None` when archiving is disabled.
    ///
    /// Defaults to `<data dir>/jokebook/archive.jsonl`.
    pub fn archive_path(&self) -> Option<PathBuf> {
        if !self.archive.enabled {
            return None;
        }
        match &self.archive.path {
            Some(path) => Some(expand_home(path)),
            None => default_archive_path(),
        }
    }
}

/// Default archive location under the platform data directory
pub fn default_archive_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("jokebook").join("archive.jsonl"))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
