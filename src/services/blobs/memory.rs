//! In-memory blob backend.
//!
//! Provides a fast, non-persistent blob store using DashMap for
//! concurrent access. Ideal for testing and development.

use super::backend::BlobBackend;
use super::filename::{generate_filename, validate_filename};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory blob storage using DashMap.
///
/// All data is lost when the process exits.
///
/// # Thread Safety
///
/// `MemoryBlobBackend` is `Clone` and uses `DashMap` internally for
/// lock-free concurrent access. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryBlobBackend {
    data: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryBlobBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of blobs in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes a blob without going through filename validation.
    ///
    /// Test hook for simulating a blob that vanished out-of-band.
    pub fn remove_raw(&self, filename: &str) {
        self.data.remove(filename);
    }
}

#[async_trait]
impl BlobBackend for MemoryBlobBackend {
    async fn write(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let filename = generate_filename(original_name);
        self.data.insert(filename.clone(), data.to_vec());
        Ok(filename)
    }

    async fn read(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        validate_filename(filename)?;
        Ok(self.data.get(filename).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, filename: &str) -> Result<bool> {
        validate_filename(filename)?;
        Ok(self.data.contains_key(filename))
    }

    async fn delete(&self, filename: &str) -> Result<bool> {
        validate_filename(filename)?;
        Ok(self.data.remove(filename).is_some())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.data.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read() {
        let backend = MemoryBlobBackend::new();

        let filename = backend.write("cat.png", b"bytes").await.unwrap();
        let data = backend.read(&filename).await.unwrap().unwrap();
        assert_eq!(data, b"bytes");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let backend = MemoryBlobBackend::new();

        let filename = backend.write("cat.png", b"bytes").await.unwrap();
        assert!(backend.delete(&filename).await.unwrap());
        assert!(!backend.delete(&filename).await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let backend = MemoryBlobBackend::new();
        let clone = backend.clone();

        let filename = backend.write("cat.png", b"bytes").await.unwrap();
        assert!(clone.exists(&filename).await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let backend = MemoryBlobBackend::new();
        assert!(backend.read("../secret").await.is_err());
    }
}
