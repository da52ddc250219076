//! In-memory record backend.
//!
//! Non-persistent record store for testing and development. Matches the
//! JSON-file backend's semantics, including insertion-order listing.

use super::backend::RecordBackend;
use super::types::ImageRecord;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory record store.
///
/// Uses a `Vec` under an `RwLock` rather than a map so that `get_all`
/// preserves insertion order, like the file backend.
///
/// # Thread Safety
///
/// `MemoryRecordBackend` is `Clone`; clones share the same collection.
#[derive(Clone, Default)]
pub struct MemoryRecordBackend {
    state: Arc<RwLock<Vec<ImageRecord>>>,
}

impl MemoryRecordBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }
}

#[async_trait]
impl RecordBackend for MemoryRecordBackend {
    async fn get_all(&self) -> Result<Vec<ImageRecord>> {
        Ok(self.state.read().clone())
    }

    async fn replace_all(&self, records: Vec<ImageRecord>) -> Result<()> {
        *self.state.write() = records;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ImageRecord>> {
        Ok(self
            .state
            .read()
            .iter()
            .find(|record| record.id == id)
            .cloned())
    }

    async fn upsert(&self, record: ImageRecord) -> Result<()> {
        let mut state = self.state.write();
        if let Some(existing) = state.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        } else {
            state.push(record);
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write();
        let before = state.len();
        state.retain(|record| record.id != id);
        Ok(state.len() != before)
    }
}
