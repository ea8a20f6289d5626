//! Append-only JSON-lines tracking log.
//!
//! The service never reads this file back; it exists for log shippers and
//! offline analysis.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use pixeltrace_core::error::{AppError, ErrorKind};
use pixeltrace_core::result::AppResult;
use pixeltrace_core::types::TrackRecord;

/// Open handle on the tracking log file.
#[derive(Debug)]
pub struct TrackLog {
    path: PathBuf,
    file: File,
}

impl TrackLog {
    /// Opens (creating if needed) the log file in append mode, creating
    /// missing parent directories first.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create log directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open tracking log: {}", path.display()),
                    e,
                )
            })?;

        info!(path = %path.display(), "Tracking log opened");
        Ok(Self { path, file })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes one record as a single JSON line and flushes it.
    pub async fn append(&mut self, record: &TrackRecord) -> AppResult<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        self.file.write_all(&line).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to write tracking log", e)
        })?;
        self.file.flush().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to flush tracking log", e)
        })?;

        debug!(uid = record.uid(), bytes = line.len(), "Appended tracking log line");
        Ok(())
    }
}
