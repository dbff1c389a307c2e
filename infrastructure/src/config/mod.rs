//! Configuration file loading for jokebook
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `JOKEBOOK_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./jokebook.toml` or `./.jokebook.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/jokebook/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileArchiveConfig, FileConfig, FileOutputConfig, FileRevealConfig,
    default_archive_path,
};
pub use loader::ConfigLoader;
