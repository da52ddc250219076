//! High-level `AssetHostClient` wrapper over backend implementations.
//!
//! Provides a convenient API that wraps any `AssetHostBackend` implementation.

use super::backend::{AssetHostBackend, RemoteAsset};
use super::http::HttpAssetHost;
use super::memory::MemoryAssetHost;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// High-level remote asset host interface.
///
/// Wraps an `AssetHostBackend` implementation and provides a consistent
/// API regardless of the underlying transport.
///
/// # Thread Safety
///
/// `AssetHostClient` is `Clone` and can be shared across threads.
#[derive(Clone)]
pub struct AssetHostClient {
    backend: Arc<dyn AssetHostBackend>,
}

impl AssetHostClient {
    /// Creates a new `AssetHostClient` talking HTTP to a real asset host.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn http(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let backend = HttpAssetHost::new(base_url, api_key, timeout)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates a new `AssetHostClient` backed by an in-process fake.
    ///
    /// Ideal for testing. Assets live in memory only.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryAssetHost::new()),
        }
    }

    /// Creates a new `AssetHostClient` with a custom backend.
    pub fn custom<B: AssetHostBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a new `AssetHostClient` from a boxed backend.
    ///
    /// Useful when working with trait objects directly.
    pub fn from_boxed(backend: Box<dyn AssetHostBackend>) -> Self {
        Self {
            backend: Arc::from(backend),
        }
    }

    /// Uploads bytes to the asset host.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or service-side failure.
    pub async fn upload(
        &self,
        data: &[u8],
        display_name: &str,
        content_type: &str,
    ) -> Result<RemoteAsset> {
        self.backend.upload(data, display_name, content_type).await
    }

    /// Checks whether an asset still exists on the host.
    ///
    /// `Ok` is a definitive answer from the host.
    ///
    /// # Errors
    ///
    /// Returns an error when no definitive answer was obtained; callers
    /// must treat this as inconclusive, not as absence.
    pub async fn exists(&self, asset_id: &str) -> Result<bool> {
        self.backend.exists(asset_id).await
    }

    /// Deletes an asset from the host. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or service-side failure.
    pub async fn delete(&self, asset_id: &str) -> Result<()> {
        self.backend.delete(asset_id).await
    }
}
