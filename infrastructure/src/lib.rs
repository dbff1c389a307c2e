//! Infrastructure layer for jokebook
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod archive;
pub mod config;

// Re-export commonly used types
pub use archive::JsonlJokeArchive;
pub use config::{
    ConfigLoader, ConfigValidationError, FileArchiveConfig, FileConfig, FileOutputConfig,
    FileRevealConfig,
};
