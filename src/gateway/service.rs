//! The gateway service: upload, listing, restore, and delete workflows
//! over the three backing stores.

use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{Config, LimitsConfig};
use crate::constants::{BLOBS_DIR, RECORDS_FILE};
use crate::error::{Error, Result};
use crate::paths;
use crate::services::blobs::{BlobStore, validate_filename};
use crate::services::records::{ImageRecord, RecordStore};
use crate::services::remote::AssetHostClient;

use super::reconcile;
use super::types::{DeleteOutcome, Reconciliation};

/// Image gateway over the record store, local blob store, and remote
/// asset host.
///
/// Owns the workflow logic and the consistency policy between the three
/// independently-failing stores; the stores themselves stay dumb.
///
/// # Thread Safety
///
/// `Gateway` is `Clone` and can be shared across request handlers. All
/// cross-store consistency relies on the record store serializing its
/// mutations, not on exclusive access to the gateway.
#[derive(Clone)]
pub struct Gateway {
    records: RecordStore,
    blobs: BlobStore,
    remote: AssetHostClient,
    limits: LimitsConfig,
}

impl Gateway {
    /// Creates a gateway over the given stores.
    pub fn new(
        records: RecordStore,
        blobs: BlobStore,
        remote: AssetHostClient,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            records,
            blobs,
            remote,
            limits,
        }
    }

    /// Limits this gateway enforces on uploads and listings.
    pub(crate) fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Opens the file-backed stores named by the configuration and
    /// builds the HTTP asset host client.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be opened or the remote client
    /// cannot be built.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let data_dir = match &config.storage.data_dir {
            Some(dir) => dir.clone(),
            None => paths::get_data_dir()?,
        };
        let records_path = data_dir.join(RECORDS_FILE);
        let blobs_dir = data_dir.join(BLOBS_DIR);

        let records = RecordStore::file(&records_path).with_context(|| {
            format!("Failed to open record store at {}", records_path.display())
        })?;
        let blobs = BlobStore::file(&blobs_dir)
            .with_context(|| format!("Failed to open blob store at {}", blobs_dir.display()))?;
        let remote = AssetHostClient::http(
            &config.remote.base_url,
            &config.remote.api_key,
            Duration::from_secs(config.remote.timeout_secs),
        )?;

        info!(
            data_dir = %data_dir.display(),
            remote = %config.remote.base_url,
            "Stores opened"
        );
        Ok(Self::new(records, blobs, remote, config.limits.clone()))
    }

    /// Upload workflow: validate, write the local blob, upload to the
    /// asset host, then persist the record.
    ///
    /// A record is only ever created after both copies exist. If the
    /// remote upload fails, the freshly written blob is removed again so
    /// no orphan remains from the attempt.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUpload`] for an empty body
    /// - [`Error::UnsupportedMediaType`] for non-image content types
    /// - [`Error::UploadTooLarge`] above the configured ceiling
    /// - [`Error::RemoteUpload`] if the asset host rejects the upload
    /// - [`Error::StoreUnavailable`] if the record cannot be persisted
    pub async fn upload(
        &self,
        data: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<ImageRecord> {
        // All validation happens before any storage write
        if data.is_empty() {
            return Err(Error::InvalidUpload("empty file".to_string()));
        }
        if !is_image_type(content_type) {
            return Err(Error::UnsupportedMediaType {
                content_type: content_type.to_string(),
            });
        }
        let size = data.len() as u64;
        if size > self.limits.max_upload_bytes {
            return Err(Error::UploadTooLarge {
                size,
                limit: self.limits.max_upload_bytes,
            });
        }

        let checksum = blake3::hash(data).to_hex().to_string();
        let local_filename = self.blobs.write(original_name, data).await?;

        let asset = match self.remote.upload(data, original_name, content_type).await {
            Ok(asset) => asset,
            Err(e) => {
                // No record exists yet; remove the half-written blob so
                // the attempt leaves nothing behind
                if let Err(cleanup) = self.blobs.delete(&local_filename).await {
                    warn!(
                        filename = %local_filename,
                        error = format!("{cleanup:#}"),
                        "Failed to remove local blob after failed remote upload"
                    );
                }
                return Err(Error::remote_upload(format!("{e:#}")));
            },
        };

        let record = ImageRecord {
            id: Uuid::new_v4().to_string(),
            local_filename: local_filename.clone(),
            original_name: original_name.to_string(),
            remote_asset_id: asset.asset_id,
            remote_url: asset.url,
            content_type: content_type.to_string(),
            size,
            checksum,
            uploaded_at: Utc::now(),
            restored_at: None,
        };

        if let Err(e) = self.records.upsert(record.clone()).await {
            // Without a record neither copy is reachable; clean up both
            // rather than leak them
            if let Err(cleanup) = self.blobs.delete(&local_filename).await {
                warn!(
                    filename = %local_filename,
                    error = format!("{cleanup:#}"),
                    "Failed to remove local blob after record persist failure"
                );
            }
            if let Err(cleanup) = self.remote.delete(&record.remote_asset_id).await {
                warn!(
                    remote_asset_id = %record.remote_asset_id,
                    error = format!("{cleanup:#}"),
                    "Failed to remove remote asset after record persist failure"
                );
            }
            return Err(Error::store_unavailable(format!("{e:#}")));
        }

        info!(
            id = %record.id,
            filename = %record.local_filename,
            remote_asset_id = %record.remote_asset_id,
            size,
            "Image uploaded"
        );

        Ok(record)
    }

    /// Listing workflow: reconcile the stores and return each surviving
    /// record with its freshly computed remote status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the record store cannot be
    /// read or the purge write-back fails. Individual remote check
    /// failures never abort the listing; they classify as `unknown`.
    pub async fn list(&self) -> Result<Reconciliation> {
        reconcile::reconcile(
            &self.records,
            &self.blobs,
            &self.remote,
            self.limits.remote_check_concurrency,
        )
        .await
    }

    /// Restore workflow: re-upload the local blob for a record whose
    /// remote copy is missing, then update the record in place.
    ///
    /// Only the remote fields and `restored_at` change; `id` and
    /// `local_filename` are immutable.
    ///
    /// # Errors
    ///
    /// - [`Error::RecordNotFound`] if the id is unknown
    /// - [`Error::LocalBlobMissing`] if the blob vanished (terminal)
    /// - [`Error::RemoteUpload`] if the re-upload fails
    /// - [`Error::StoreUnavailable`] if the update cannot be persisted
    pub async fn restore(&self, id: &str) -> Result<ImageRecord> {
        let record = self
            .records
            .find_by_id(id)
            .await
            .map_err(|e| Error::store_unavailable(format!("{e:#}")))?
            .ok_or_else(|| Error::record_not_found(id))?;

        let data = self
            .blobs
            .read(&record.local_filename)
            .await?
            .ok_or_else(|| Error::local_blob_missing(id, &record.local_filename))?;

        let checksum = blake3::hash(&data).to_hex().to_string();
        if checksum != record.checksum {
            // The local copy is all we have, so restore it anyway, but
            // leave a trace for the operator
            warn!(
                id = %record.id,
                filename = %record.local_filename,
                expected = %record.checksum,
                actual = %checksum,
                "Local blob checksum changed since upload; restoring current bytes"
            );
        }

        let asset = self
            .remote
            .upload(&data, &record.original_name, &record.content_type)
            .await
            .map_err(|e| Error::remote_upload(format!("{e:#}")))?;

        let mut updated = record;
        updated.remote_asset_id = asset.asset_id;
        updated.remote_url = asset.url;
        updated.restored_at = Some(Utc::now());

        self.records
            .upsert(updated.clone())
            .await
            .map_err(|e| Error::store_unavailable(format!("{e:#}")))?;

        info!(
            id = %updated.id,
            remote_asset_id = %updated.remote_asset_id,
            "Image restored to remote host"
        );

        Ok(updated)
    }

    /// Delete workflow: best-effort removal of the remote asset and the
    /// local blob, then removal of the record.
    ///
    /// Sub-delete failures become warnings in the outcome; the record is
    /// removed regardless, after both attempts. Only a record-store
    /// failure fails the request.
    ///
    /// # Errors
    ///
    /// - [`Error::RecordNotFound`] if the id is unknown
    /// - [`Error::StoreUnavailable`] if the record cannot be removed
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        let record = self
            .records
            .find_by_id(id)
            .await
            .map_err(|e| Error::store_unavailable(format!("{e:#}")))?
            .ok_or_else(|| Error::record_not_found(id))?;

        let mut warnings = Vec::new();

        if let Err(e) = self.remote.delete(&record.remote_asset_id).await {
            warn!(
                id = %record.id,
                remote_asset_id = %record.remote_asset_id,
                error = format!("{e:#}"),
                "Remote asset delete failed; removing record anyway"
            );
            warnings.push(format!("remote asset delete failed: {e:#}"));
        }

        if let Err(e) = self.blobs.delete(&record.local_filename).await {
            warn!(
                id = %record.id,
                filename = %record.local_filename,
                error = format!("{e:#}"),
                "Local blob delete failed; removing record anyway"
            );
            warnings.push(format!("local blob delete failed: {e:#}"));
        }

        // Record removal comes last, after both attempts
        self.records
            .remove(id)
            .await
            .map_err(|e| Error::store_unavailable(format!("{e:#}")))?;

        info!(id = %record.id, warnings = warnings.len(), "Image deleted");

        Ok(DeleteOutcome {
            id: record.id,
            warnings,
        })
    }

    /// Reads a blob for direct serving.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlobNotFound`] for absent blobs and for invalid
    /// filenames, so traversal probes are indistinguishable from misses.
    pub async fn read_blob(&self, filename: &str) -> Result<Vec<u8>> {
        if validate_filename(filename).is_err() {
            return Err(Error::blob_not_found(filename));
        }
        match self.blobs.read(filename).await? {
            Some(data) => Ok(data),
            None => Err(Error::blob_not_found(filename)),
        }
    }
}

/// Accepts `image/*` media types, ignoring parameters and case.
fn is_image_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_is_image_type() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/jpeg"));
        assert!(is_image_type("IMAGE/PNG"));
        assert!(is_image_type("image/webp; charset=binary"));
        assert!(!is_image_type("text/plain"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_image_type(""));
        assert!(!is_image_type("imagery/fake"));
    }
}
