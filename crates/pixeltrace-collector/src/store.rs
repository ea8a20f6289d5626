//! Process-wide ordered record store.

use tokio::sync::Mutex;
use tracing::info;

use pixeltrace_core::result::AppResult;
use pixeltrace_core::types::TrackRecord;

use crate::log::TrackLog;

/// In-memory sequence of tracking records plus the tracking log handle.
///
/// Both live behind one mutex so that "write the log line, then append to
/// memory" happens as a single step: concurrent hits never interleave and a
/// failed log write leaves memory untouched.
#[derive(Debug)]
pub struct TrackStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    records: Vec<TrackRecord>,
    log: TrackLog,
}

impl TrackStore {
    /// Creates an empty store writing to the given log.
    pub fn new(log: TrackLog) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                records: Vec::new(),
                log,
            }),
        }
    }

    /// Writes the record to the tracking log, then appends it.
    ///
    /// Returns the number of stored records after the append.
    pub async fn append_logged(&self, record: TrackRecord) -> AppResult<usize> {
        let mut inner = self.inner.lock().await;
        inner.log.append(&record).await?;
        inner.records.push(record);
        Ok(inner.records.len())
    }

    /// Appends the record to memory only.
    pub async fn append(&self, record: TrackRecord) -> usize {
        let mut inner = self.inner.lock().await;
        inner.records.push(record);
        inner.records.len()
    }

    /// Copy of all records in insertion order.
    pub async fn snapshot(&self) -> Vec<TrackRecord> {
        self.inner.lock().await.records.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Truncates the store in place and returns how many records were dropped.
    /// The tracking log is left as is.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.lock().await;
        let removed = inner.records.len();
        inner.records.clear();
        info!(removed, log = %inner.log.path().display(), "Tracking store cleared");
        removed
    }
}
