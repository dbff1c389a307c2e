//! JSONL file writer for archive records.
//!
//! Each [`ArchiveRecord`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use async_trait::async_trait;
use jokebook_application::{ArchiveError, ArchiveSink};
use jokebook_domain::ArchiveRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

const EVENT_TYPE: &str = "joke_archived";

/// JSONL joke archive that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and
/// on `Drop`.
pub struct JsonlJokeArchive {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlJokeArchive {
    /// Open (or create) the archive at the given path.
    ///
    /// Creates parent directories as needed. Existing records are kept.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Joke archive opened at {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn render(record: &ArchiveRecord) -> Result<String, ArchiveError> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut value =
            serde_json::to_value(record).map_err(|e| ArchiveError::Serialize(e.to_string()))?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(EVENT_TYPE.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
        }

        serde_json::to_string(&value).map_err(|e| ArchiveError::Serialize(e.to_string()))
    }
}

#[async_trait]
impl ArchiveSink for JsonlJokeArchive {
    async fn archive(&self, record: &ArchiveRecord) -> Result<(), ArchiveError> {
        let line = Self::render(record)?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", line)?;
        // JSONL is append-only; flush so a crash loses at most the current line
        writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlJokeArchive {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
