//! High-level `BlobStore` wrapper over backend implementations.
//!
//! Provides a convenient API that wraps any `BlobBackend` implementation.

use super::backend::BlobBackend;
use super::filesystem::FilesystemBlobBackend;
use super::memory::MemoryBlobBackend;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// High-level blob store interface.
///
/// Wraps a `BlobBackend` implementation and provides a consistent API
/// regardless of the underlying storage mechanism.
///
/// # Thread Safety
///
/// `BlobStore` is `Clone` and can be shared across threads. The underlying
/// backend handles concurrent access safely.
///
/// # Example
///
/// ```ignore
/// use pixgate::services::blobs::BlobStore;
///
/// // Create an in-memory store
/// let blobs = BlobStore::memory();
///
/// // Store an upload
/// let filename = blobs.write("cat.png", &image_bytes).await?;
///
/// // Read it back
/// if let Some(data) = blobs.read(&filename).await? {
///     println!("{} bytes", data.len());
/// }
/// ```
#[derive(Clone)]
pub struct BlobStore {
    backend: Arc<dyn BlobBackend>,
}

impl BlobStore {
    /// Creates a new `BlobStore` backed by a filesystem directory.
    ///
    /// This is the default for gateway usage where persistence is required.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob directory cannot be created.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = FilesystemBlobBackend::open(path)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates a new `BlobStore` backed by an in-memory store.
    ///
    /// Ideal for testing and development. All data is lost when the
    /// process exits.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryBlobBackend::new()),
        }
    }

    /// Creates a new `BlobStore` with a custom backend.
    pub fn custom<B: BlobBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a new `BlobStore` from a boxed backend.
    ///
    /// Useful when working with trait objects directly.
    pub fn from_boxed(backend: Box<dyn BlobBackend>) -> Self {
        Self {
            backend: Arc::from(backend),
        }
    }

    /// Stores blob bytes under a newly generated unique filename.
    ///
    /// Returns the generated filename.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write(&self, original_name: &str, data: &[u8]) -> Result<String> {
        self.backend.write(original_name, data).await
    }

    /// Retrieves blob bytes by filename.
    ///
    /// Returns `Ok(None)` if the blob doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is invalid or the read fails.
    pub async fn read(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        self.backend.read(filename).await
    }

    /// Checks whether a blob exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is invalid.
    pub async fn exists(&self, filename: &str) -> Result<bool> {
        self.backend.exists(filename).await
    }

    /// Deletes a blob.
    ///
    /// Returns `Ok(true)` if the blob existed, `Ok(false)` otherwise.
    /// Deleting a non-existent blob is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is invalid or deletion fails.
    pub async fn delete(&self, filename: &str) -> Result<bool> {
        self.backend.delete(filename).await
    }

    /// Lists all blob filenames in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if enumeration fails.
    pub async fn list(&self) -> Result<Vec<String>> {
        self.backend.list().await
    }
}
