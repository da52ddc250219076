//! In-memory asset host fake.
//!
//! Stands in for the real asset host in tests. Supports deleting assets
//! "out-of-band" to simulate remote data loss, and failure injection to
//! exercise transport-error paths.

use super::backend::{AssetHostBackend, RemoteAsset};
use anyhow::{Result, bail};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Default)]
struct Inner {
    assets: DashMap<String, Vec<u8>>,
    next_id: AtomicU64,
    fail_uploads: AtomicBool,
    fail_checks: AtomicBool,
    fail_deletes: AtomicBool,
}

/// In-memory stand-in for the remote asset host.
///
/// # Thread Safety
///
/// `MemoryAssetHost` is `Clone`; clones share the same asset map and
/// failure flags, so a test can keep a handle while the gateway owns
/// another.
#[derive(Clone, Default)]
pub struct MemoryAssetHost {
    inner: Arc<Inner>,
}

impl MemoryAssetHost {
    /// Creates a new empty asset host fake.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of assets currently hosted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.assets.len()
    }

    /// Returns true if no assets are hosted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.assets.is_empty()
    }

    /// Deletes an asset without going through the client API.
    ///
    /// Simulates the remote copy vanishing out-of-band.
    pub fn remove_out_of_band(&self, asset_id: &str) {
        self.inner.assets.remove(asset_id);
    }

    /// Returns the stored bytes for an asset, if present.
    #[must_use]
    pub fn bytes(&self, asset_id: &str) -> Option<Vec<u8>> {
        self.inner
            .assets
            .get(asset_id)
            .map(|entry| entry.value().clone())
    }

    /// Makes subsequent uploads fail.
    pub fn fail_uploads(&self, fail: bool) {
        self.inner.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent existence checks fail (transport error).
    pub fn fail_checks(&self, fail: bool) {
        self.inner.fail_checks.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent deletes fail.
    pub fn fail_deletes(&self, fail: bool) {
        self.inner.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssetHostBackend for MemoryAssetHost {
    async fn upload(
        &self,
        data: &[u8],
        _display_name: &str,
        _content_type: &str,
    ) -> Result<RemoteAsset> {
        if self.inner.fail_uploads.load(Ordering::SeqCst) {
            bail!("injected upload failure");
        }

        let n = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let asset_id = format!("asset-{n}");
        self.inner.assets.insert(asset_id.clone(), data.to_vec());

        Ok(RemoteAsset {
            url: format!("memory://assets/{asset_id}"),
            asset_id,
        })
    }

    async fn exists(&self, asset_id: &str) -> Result<bool> {
        if self.inner.fail_checks.load(Ordering::SeqCst) {
            bail!("injected transport failure");
        }
        Ok(self.inner.assets.contains_key(asset_id))
    }

    async fn delete(&self, asset_id: &str) -> Result<()> {
        if self.inner.fail_deletes.load(Ordering::SeqCst) {
            bail!("injected delete failure");
        }
        self.inner.assets.remove(asset_id);
        Ok(())
    }
}
