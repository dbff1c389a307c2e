//! Application layer for jokebook
//!
//! This crate contains use cases, port definitions, the reveal timer and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod timer;
pub mod use_cases;

// Re-export commonly used types
pub use config::RevealConfig;
pub use ports::{
    archive::{ArchiveError, ArchiveSink, MemoryArchive, NoArchive},
    display::{DisplaySink, NoDisplay},
};
pub use timer::{RevealTimer, TimerError};
pub use use_cases::joke_session::{JokeSession, SessionEvent, SessionHandle, TellJokeError};
pub use use_cases::tell_joke::TellJokeUseCase;
