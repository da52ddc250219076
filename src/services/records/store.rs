//! High-level `RecordStore` wrapper over backend implementations.
//!
//! Provides a convenient API that wraps any `RecordBackend` implementation.

use super::backend::RecordBackend;
use super::json_file::JsonFileBackend;
use super::memory::MemoryRecordBackend;
use super::types::ImageRecord;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// High-level metadata record store interface.
///
/// Wraps a `RecordBackend` implementation and provides a consistent API
/// regardless of the underlying persistence mechanism.
///
/// # Thread Safety
///
/// `RecordStore` is `Clone` and can be shared across threads. The
/// underlying backend serializes mutations so concurrent requests never
/// lose updates.
///
/// # Example
///
/// ```ignore
/// use pixgate::services::records::RecordStore;
///
/// let records = RecordStore::memory();
/// records.upsert(record).await?;
/// let all = records.get_all().await?;
/// ```
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn RecordBackend>,
}

impl RecordStore {
    /// Creates a new `RecordStore` backed by a JSON file.
    ///
    /// This is the default for gateway usage where persistence is required.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = JsonFileBackend::open(path)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates a new `RecordStore` backed by an in-memory store.
    ///
    /// Ideal for testing and development. All data is lost when the
    /// process exits.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryRecordBackend::new()),
        }
    }

    /// Creates a new `RecordStore` with a custom backend.
    pub fn custom<B: RecordBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a new `RecordStore` from a boxed backend.
    ///
    /// Useful when working with trait objects directly.
    pub fn from_boxed(backend: Box<dyn RecordBackend>) -> Self {
        Self {
            backend: Arc::from(backend),
        }
    }

    /// Returns every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    pub async fn get_all(&self) -> Result<Vec<ImageRecord>> {
        self.backend.get_all().await
    }

    /// Replaces the entire collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    pub async fn replace_all(&self, records: Vec<ImageRecord>) -> Result<()> {
        self.backend.replace_all(records).await
    }

    /// Looks up a single record by id.
    ///
    /// Returns `Ok(None)` if no record has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<ImageRecord>> {
        self.backend.find_by_id(id).await
    }

    /// Inserts a record, or replaces the existing record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    pub async fn upsert(&self, record: ImageRecord) -> Result<()> {
        self.backend.upsert(record).await
    }

    /// Removes a record by id.
    ///
    /// Returns `Ok(true)` if the record existed, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        self.backend.remove(id).await
    }
}
