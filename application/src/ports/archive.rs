//! Port for archiving told jokes.
//!
//! Defines the [`ArchiveSink`] trait that receives one [`ArchiveRecord`] per
//! completed session. This is separate from `tracing`-based operation logs:
//! tracing handles diagnostics, while this port captures the history of
//! told jokes.

use async_trait::async_trait;
use jokebook_domain::ArchiveRecord;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors an archive adapter may report.
///
/// These never abort a session; the dispatcher logs them and moves on.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not serialize archive record: {0}")]
    Serialize(String),
}

/// Persistence/history collaborator for completed sessions.
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// Store one archive record.
    async fn archive(&self, record: &ArchiveRecord) -> Result<(), ArchiveError>;
}

/// No-op implementation for when archiving is disabled.
pub struct NoArchive;

#[async_trait]
impl ArchiveSink for NoArchive {
    async fn archive(&self, _record: &ArchiveRecord) -> Result<(), ArchiveError> {
        Ok(())
    }
}

/// Keeps archive records in memory.
#[derive(Default)]
pub struct MemoryArchive {
    records: Mutex<Vec<ArchiveRecord>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records archived so far, oldest first.
    pub fn records(&self) -> Vec<ArchiveRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ArchiveSink for MemoryArchive {
    async fn archive(&self, record: &ArchiveRecord) -> Result<(), ArchiveError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jokebook_domain::{Category, Joke, SessionId};

    #[tokio::test]
    async fn test_memory_archive_keeps_order() {
        let archive = MemoryArchive::new();
        let first = Joke::new("Q1", "A1", Category::Chicken);
        let second = Joke::new("Q2", "A2", Category::Lawyer);

        archive
            .archive(&ArchiveRecord::new(SessionId::new(), &first))
            .await
            .unwrap();
        archive
            .archive(&ArchiveRecord::new(SessionId::new(), &second))
            .await
            .unwrap();

        let questions: Vec<_> = archive
            .records()
            .into_iter()
            .map(|r| r.question)
            .collect();
        assert_eq!(questions, vec!["Q1", "Q2"]);
    }
}
