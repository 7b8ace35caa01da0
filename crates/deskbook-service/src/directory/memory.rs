//! In-memory desk directory.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use deskbook_core::error::AppError;
use deskbook_core::result::AppResult;
use deskbook_entity::DeskRecord;

use super::DeskDirectory;

/// Directory serving records held in memory.
///
/// Useful for demos and tests: records can be swapped and failures
/// injected between fetches.
#[derive(Debug, Default)]
pub struct MemoryDeskDirectory {
    records: RwLock<Vec<DeskRecord>>,
    failure: RwLock<Option<String>>,
    fetches: AtomicUsize,
}

impl MemoryDeskDirectory {
    /// Create a directory serving `records`.
    pub fn new(records: Vec<DeskRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            failure: RwLock::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replace the served records.
    pub async fn set_records(&self, records: Vec<DeskRecord>) {
        *self.records.write().await = records;
    }

    /// Make subsequent fetches fail with `message` (or succeed again with `None`).
    pub async fn set_failure(&self, message: Option<&str>) {
        *self.failure.write().await = message.map(str::to_string);
    }

    /// Number of fetch attempts so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeskDirectory for MemoryDeskDirectory {
    async fn fetch_desks(&self) -> AppResult<Vec<DeskRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failure.read().await.as_ref() {
            return Err(AppError::external_service(message.clone()));
        }
        Ok(self.records.read().await.clone())
    }
}
