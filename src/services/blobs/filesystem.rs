//! Filesystem-backed blob backend.
//!
//! Stores each blob as a regular file inside a flat base directory.

use super::backend::BlobBackend;
use super::filename::{generate_filename, validate_filename};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed blob storage.
///
/// Blobs live directly under the base directory; there are no
/// subdirectories, so enumeration is a single readdir.
///
/// # Thread Safety
///
/// `FilesystemBlobBackend` is `Clone` and can be shared across threads.
/// Generated filenames are unique, so concurrent writes never touch the
/// same file.
#[derive(Clone)]
pub struct FilesystemBlobBackend {
    base_dir: PathBuf,
}

impl FilesystemBlobBackend {
    /// Creates or opens the blob store at the given base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create blob directory: {}", base_dir.display()))?;

        Ok(Self { base_dir })
    }

    /// Returns the base directory blobs are stored in.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn blob_path(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.base_dir.join(filename))
    }

    fn write_sync(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let filename = generate_filename(original_name);
        let path = self.base_dir.join(&filename);

        fs::write(&path, data).with_context(|| format!("Failed to write blob: {filename}"))?;

        Ok(filename)
    }

    fn read_sync(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(filename)?;

        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path).with_context(|| format!("Failed to read blob: {filename}"))?;
        Ok(Some(data))
    }

    fn exists_sync(&self, filename: &str) -> Result<bool> {
        let path = self.blob_path(filename)?;
        Ok(path.is_file())
    }

    fn delete_sync(&self, filename: &str) -> Result<bool> {
        let path = self.blob_path(filename)?;

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).with_context(|| format!("Failed to delete blob: {filename}"))?;
        Ok(true)
    }

    fn list_sync(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.base_dir).with_context(|| {
            format!("Failed to read blob directory: {}", self.base_dir.display())
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read blob directory entry")?;
            // Skip subdirectories and anything a validated write could not
            // have produced (temp files, editor droppings)
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && validate_filename(name).is_ok()
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl BlobBackend for FilesystemBlobBackend {
    async fn write(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let backend = self.clone();
        let original_name = original_name.to_string();
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || backend.write_sync(&original_name, &data))
            .await
            .context("Task join error")?
    }

    async fn read(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        let backend = self.clone();
        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || backend.read_sync(&filename))
            .await
            .context("Task join error")?
    }

    async fn exists(&self, filename: &str) -> Result<bool> {
        let backend = self.clone();
        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || backend.exists_sync(&filename))
            .await
            .context("Task join error")?
    }

    async fn delete(&self, filename: &str) -> Result<bool> {
        let backend = self.clone();
        let filename = filename.to_string();
        tokio::task::spawn_blocking(move || backend.delete_sync(&filename))
            .await
            .context("Task join error")?
    }

    async fn list(&self) -> Result<Vec<String>> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.list_sync())
            .await
            .context("Task join error")?
    }
}
