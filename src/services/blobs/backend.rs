//! Backend trait for the blob store.
//!
//! Defines the interface that all blob backends must implement,
//! enabling pluggable storage (filesystem, memory).

use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for blob storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Filenames are generated by the backend on write and validated on every
/// lookup, so callers never hand the backend a raw path.
#[async_trait]
pub trait BlobBackend: Send + Sync + 'static {
    /// Stores blob bytes under a newly generated unique filename.
    ///
    /// # Arguments
    /// * `original_name` - Client-supplied name; only its sanitized form
    ///   contributes to the generated filename
    /// * `data` - Blob bytes
    ///
    /// # Returns
    /// The generated filename the blob is stored under.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn write(&self, original_name: &str, data: &[u8]) -> Result<String>;

    /// Retrieves blob bytes by filename.
    ///
    /// # Returns
    /// * `Ok(Some(data))` - Blob found
    /// * `Ok(None)` - Blob not found
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is invalid or the read fails.
    async fn read(&self, filename: &str) -> Result<Option<Vec<u8>>>;

    /// Checks whether a blob exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is invalid.
    async fn exists(&self, filename: &str) -> Result<bool>;

    /// Deletes a blob.
    ///
    /// Deleting a non-existent blob is not an error.
    ///
    /// # Returns
    /// * `Ok(true)` - Blob existed and was deleted
    /// * `Ok(false)` - Blob did not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is invalid or deletion fails.
    async fn delete(&self, filename: &str) -> Result<bool>;

    /// Lists all blob filenames in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if enumeration fails.
    async fn list(&self) -> Result<Vec<String>>;
}
