//! Application-level configuration.
//!
//! - [`RevealConfig`]: countdown length and tick pacing

pub mod reveal_config;

pub use reveal_config::RevealConfig;
