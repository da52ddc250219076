//! Backend trait for the record store.
//!
//! Defines the interface that all record backends must implement,
//! enabling pluggable persistence (JSON file, memory).

use super::types::ImageRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for the metadata record store.
///
/// The store is one flat collection, read and written whole. Backends
/// must serialize mutations internally: concurrent `upsert`, `remove`,
/// and `replace_all` calls must never lose an update to a racing
/// read-modify-write.
#[async_trait]
pub trait RecordBackend: Send + Sync + 'static {
    /// Returns every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    async fn get_all(&self) -> Result<Vec<ImageRecord>>;

    /// Replaces the entire collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    async fn replace_all(&self, records: Vec<ImageRecord>) -> Result<()>;

    /// Looks up a single record by id.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - No record with this id
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    async fn find_by_id(&self, id: &str) -> Result<Option<ImageRecord>>;

    /// Inserts a record, or replaces the existing record with the same id.
    ///
    /// Replacement keeps the record's position in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    async fn upsert(&self, record: ImageRecord) -> Result<()>;

    /// Removes a record by id.
    ///
    /// # Returns
    /// * `Ok(true)` - Record existed and was removed
    /// * `Ok(false)` - No record with this id
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    async fn remove(&self, id: &str) -> Result<bool>;
}
