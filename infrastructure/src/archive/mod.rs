//! Archive infrastructure: persistent history of told jokes.
//!
//! Provides [`JsonlJokeArchive`], a JSONL file writer that implements
//! the [`ArchiveSink`](jokebook_application::ArchiveSink) port.

mod jsonl_archive;

pub use jsonl_archive::JsonlJokeArchive;
