//! JSON-file-backed record backend.
//!
//! Persists the whole collection as one flat JSON array. The file is
//! loaded once at open; afterwards the in-memory copy is authoritative
//! and every mutation rewrites the file through a temp-file rename.

use super::backend::RecordBackend;
use super::types::ImageRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Record store backed by a single JSON file.
///
/// # Concurrency
///
/// All mutations run under one mutex that is held across the disk write,
/// so read-modify-write cycles from concurrent requests cannot interleave
/// and lose updates. The in-memory collection is only updated after the
/// file write succeeds; a failed write leaves both file and memory on the
/// previous consistent state. Reads hop to the blocking pool too: the
/// mutex can be held across a disk write, and waiting for it must not pin
/// an executor thread.
///
/// # Thread Safety
///
/// `JsonFileBackend` is `Clone`; clones share the same lock and state.
#[derive(Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    state: Arc<Mutex<Vec<ImageRecord>>>,
}

impl JsonFileBackend {
    /// Opens the record store at the given file path, creating an empty
    /// store if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - An existing file cannot be read or contains invalid JSON
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create records directory: {}", parent.display())
            })?;
        }

        let records = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read records file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse records file: {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            state: Arc::new(Mutex::new(records)),
        })
    }

    /// Writes the collection to disk via a temp file and atomic rename.
    fn save_sync(&self, records: &[ImageRecord]) -> Result<()> {
        let json =
            serde_json::to_vec_pretty(records).context("Failed to serialize records to JSON")?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json)
            .with_context(|| format!("Failed to write records file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!("Failed to replace records file: {}", self.path.display())
        })?;

        Ok(())
    }

    /// Applies a mutation to a copy of the collection, persists it, and
    /// commits to memory only if the disk write succeeded.
    fn mutate_sync<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<ImageRecord>) -> T,
    {
        // Lock held across the disk write: this is what serializes
        // concurrent read-modify-write cycles.
        let mut guard = self.state.lock();
        let mut next = guard.clone();
        let out = f(&mut next);
        self.save_sync(&next)?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl RecordBackend for JsonFileBackend {
    async fn get_all(&self) -> Result<Vec<ImageRecord>> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.state.lock().clone())
            .await
            .context("Task join error")
    }

    async fn replace_all(&self, records: Vec<ImageRecord>) -> Result<()> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || {
            backend.mutate_sync(move |current| {
                *current = records;
            })
        })
        .await
        .context("Task join error")?
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ImageRecord>> {
        let backend = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            backend
                .state
                .lock()
                .iter()
                .find(|record| record.id == id)
                .cloned()
        })
        .await
        .context("Task join error")
    }

    async fn upsert(&self, record: ImageRecord) -> Result<()> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || {
            backend.mutate_sync(move |current| {
                if let Some(existing) = current.iter_mut().find(|r| r.id == record.id) {
                    *existing = record;
                } else {
                    current.push(record);
                }
            })
        })
        .await
        .context("Task join error")?
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        let backend = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            backend.mutate_sync(move |current| {
                let before = current.len();
                current.retain(|record| record.id != id);
                current.len() != before
            })
        })
        .await
        .context("Task join error")?
    }
}
