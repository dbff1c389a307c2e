//! Presentation layer for jokebook
//!
//! This crate contains the CLI definition, console display sinks,
//! the catalog formatter and the interactive REPL.

pub mod cli;
pub mod display;
pub mod output;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use display::console::{ConsoleDisplay, SimpleDisplay, reveal_message};
pub use output::console::ConsoleFormatter;
pub use repl::{JokeRepl, ReplCommand};
