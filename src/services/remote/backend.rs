//! Backend trait for the remote asset host client.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifiers returned by the asset host on a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAsset {
    /// Host-assigned asset identifier, used for existence checks and deletes.
    pub asset_id: String,
    /// Public URL the asset is served from.
    pub url: String,
}

/// Backend trait for the remote asset host.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
///
/// # Error semantics
///
/// `exists` only returns `Ok` for a definitive answer from the host.
/// A transport failure (timeout, connection refused, unexpected status)
/// is an `Err` and means "inconclusive"; callers must not collapse it
/// to "missing".
#[async_trait]
pub trait AssetHostBackend: Send + Sync + 'static {
    /// Uploads bytes to the asset host.
    ///
    /// # Arguments
    /// * `data` - Image bytes
    /// * `display_name` - Name shown on the asset host
    /// * `content_type` - MIME type of the bytes
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or service-side failure
    /// (network, auth, quota). There are no partial successes.
    async fn upload(
        &self,
        data: &[u8],
        display_name: &str,
        content_type: &str,
    ) -> Result<RemoteAsset>;

    /// Checks whether an asset still exists on the host.
    ///
    /// # Returns
    /// * `Ok(true)` - Host positively confirmed presence
    /// * `Ok(false)` - Host positively confirmed absence
    ///
    /// # Errors
    ///
    /// Returns an error when no definitive answer was obtained. This is
    /// an inconclusive outcome, not absence.
    async fn exists(&self, asset_id: &str) -> Result<bool>;

    /// Deletes an asset from the host.
    ///
    /// Deleting an already-absent asset is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error on transport or service-side failure.
    async fn delete(&self, asset_id: &str) -> Result<()>;
}
