//! Tests for the gateway workflows.
//!
//! All three stores are in-memory fakes so every failure mode can be
//! injected deterministically.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::*;
use crate::config::LimitsConfig;
use crate::error::Error;
use crate::services::blobs::{BlobBackend, BlobStore, MemoryBlobBackend};
use crate::services::records::{ImageRecord, MemoryRecordBackend, RecordBackend, RecordStore};
use crate::services::remote::{AssetHostClient, MemoryAssetHost};

fn test_gateway() -> (Gateway, MemoryBlobBackend, MemoryAssetHost) {
    test_gateway_with_limits(LimitsConfig::default())
}

fn test_gateway_with_limits(limits: LimitsConfig) -> (Gateway, MemoryBlobBackend, MemoryAssetHost) {
    let blobs = MemoryBlobBackend::new();
    let remote = MemoryAssetHost::new();
    let gateway = Gateway::new(
        RecordStore::memory(),
        BlobStore::custom(blobs.clone()),
        AssetHostClient::custom(remote.clone()),
        limits,
    );
    (gateway, blobs, remote)
}

async fn statuses(gateway: &Gateway) -> Vec<(String, RemoteStatus)> {
    gateway
        .list()
        .await
        .unwrap()
        .entries
        .into_iter()
        .map(|entry| (entry.record.id, entry.status))
        .collect()
}

// ====== Upload workflow ======

#[tokio::test]
async fn test_upload_creates_record_and_both_copies() {
    let (gateway, blobs, remote) = test_gateway();

    let record = gateway
        .upload(b"png bytes", "cat.png", "image/png")
        .await
        .unwrap();

    assert!(!record.id.is_empty());
    assert!(record.local_filename.ends_with("_cat.png"));
    assert_eq!(record.original_name, "cat.png");
    assert_eq!(record.content_type, "image/png");
    assert_eq!(record.size, 9);
    assert!(record.restored_at.is_none());

    assert_eq!(blobs.len(), 1);
    assert_eq!(remote.bytes(&record.remote_asset_id).unwrap(), b"png bytes");
}

#[tokio::test]
async fn test_upload_rejects_empty_body() {
    let (gateway, blobs, _remote) = test_gateway();

    let err = gateway.upload(b"", "cat.png", "image/png").await.unwrap_err();
    assert!(matches!(err, Error::InvalidUpload(_)));
    assert!(blobs.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let (gateway, blobs, remote) = test_gateway();

    let err = gateway
        .upload(b"%PDF-1.4", "doc.pdf", "application/pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedMediaType { .. }));

    // Rejected before any storage write
    assert!(blobs.is_empty());
    assert!(remote.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_oversize_body() {
    let limits = LimitsConfig {
        max_upload_bytes: 8,
        ..LimitsConfig::default()
    };
    let (gateway, blobs, _remote) = test_gateway_with_limits(limits);

    let err = gateway
        .upload(b"123456789", "cat.png", "image/png")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UploadTooLarge { size: 9, limit: 8 }
    ));
    assert!(blobs.is_empty());
}

#[tokio::test]
async fn test_upload_remote_failure_leaves_no_orphan_blob() {
    let (gateway, blobs, remote) = test_gateway();
    remote.fail_uploads(true);

    let err = gateway
        .upload(b"png bytes", "cat.png", "image/png")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RemoteUpload { .. }));

    // The half-written blob was cleaned up and no record was created
    assert!(blobs.is_empty());
    assert!(gateway.list().await.unwrap().entries.is_empty());
}

/// Record backend whose writes can be switched to fail.
#[derive(Clone, Default)]
struct FlakyRecordBackend {
    inner: MemoryRecordBackend,
    fail_writes: Arc<AtomicBool>,
}

#[async_trait]
impl RecordBackend for FlakyRecordBackend {
    async fn get_all(&self) -> anyhow::Result<Vec<ImageRecord>> {
        self.inner.get_all().await
    }

    async fn replace_all(&self, records: Vec<ImageRecord>) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("injected store failure");
        }
        self.inner.replace_all(records).await
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<ImageRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn upsert(&self, record: ImageRecord) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("injected store failure");
        }
        self.inner.upsert(record).await
    }

    async fn remove(&self, id: &str) -> anyhow::Result<bool> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("injected store failure");
        }
        self.inner.remove(id).await
    }
}

#[tokio::test]
async fn test_upload_record_persist_failure_cleans_up_both_copies() {
    let blobs = MemoryBlobBackend::new();
    let remote = MemoryAssetHost::new();
    let records = FlakyRecordBackend::default();
    records.fail_writes.store(true, Ordering::SeqCst);

    let gateway = Gateway::new(
        RecordStore::custom(records),
        BlobStore::custom(blobs.clone()),
        AssetHostClient::custom(remote.clone()),
        LimitsConfig::default(),
    );

    let err = gateway
        .upload(b"png bytes", "cat.png", "image/png")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::StoreUnavailable { .. }));

    // Both copies were rolled back once the record could not be written
    assert!(blobs.is_empty());
    assert!(remote.is_empty());
}

// ====== Listing / reconciliation ======

#[tokio::test]
async fn test_listing_purges_records_whose_blob_vanished() {
    let (gateway, blobs, _remote) = test_gateway();

    let kept = gateway.upload(b"one", "a.png", "image/png").await.unwrap();
    let doomed = gateway.upload(b"two", "b.png", "image/png").await.unwrap();

    blobs.remove_raw(&doomed.local_filename);

    let listing = gateway.list().await.unwrap();
    assert_eq!(listing.purged, 1);
    assert_eq!(listing.entries.len(), 1);
    assert_eq!(listing.entries[0].record.id, kept.id);

    // Purged records never reappear
    let again = gateway.list().await.unwrap();
    assert_eq!(again.purged, 0);
    assert_eq!(again.entries.len(), 1);
}

/// Blob backend that can hold one `list` call open, widening the window
/// between a listing's record snapshot and its purge.
#[derive(Clone)]
struct GatedBlobBackend {
    inner: MemoryBlobBackend,
    armed: Arc<AtomicBool>,
    entered: Arc<Semaphore>,
    release: Arc<Semaphore>,
}

impl GatedBlobBackend {
    fn new(inner: MemoryBlobBackend) -> Self {
        Self {
            inner,
            armed: Arc::new(AtomicBool::new(false)),
            entered: Arc::new(Semaphore::new(0)),
            release: Arc::new(Semaphore::new(0)),
        }
    }

    /// Makes the next `list` call block until [`release`](Self::release).
    fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Resolves once the gated `list` call has started waiting.
    async fn wait_entered(&self) {
        self.entered.acquire().await.unwrap().forget();
    }

    fn release(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl BlobBackend for GatedBlobBackend {
    async fn write(&self, original_name: &str, data: &[u8]) -> anyhow::Result<String> {
        self.inner.write(original_name, data).await
    }

    async fn read(&self, filename: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.inner.read(filename).await
    }

    async fn exists(&self, filename: &str) -> anyhow::Result<bool> {
        self.inner.exists(filename).await
    }

    async fn delete(&self, filename: &str) -> anyhow::Result<bool> {
        self.inner.delete(filename).await
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.add_permits(1);
            self.release.acquire().await.unwrap().forget();
        }
        self.inner.list().await
    }
}

#[tokio::test]
async fn test_purge_spares_record_uploaded_during_listing() {
    let blobs = MemoryBlobBackend::new();
    let remote = MemoryAssetHost::new();
    let gate = GatedBlobBackend::new(blobs.clone());
    let gateway = Gateway::new(
        RecordStore::memory(),
        BlobStore::custom(gate.clone()),
        AssetHostClient::custom(remote.clone()),
        LimitsConfig::default(),
    );

    let kept = gateway.upload(b"one", "a.png", "image/png").await.unwrap();
    let doomed = gateway.upload(b"two", "b.png", "image/png").await.unwrap();
    blobs.remove_raw(&doomed.local_filename);

    // Hold a listing open after it snapshotted the record set
    gate.arm();
    let listing = {
        let gateway = gateway.clone();
        tokio::spawn(async move { gateway.list().await.unwrap() })
    };
    gate.wait_entered().await;

    // Lands inside the window; its blob exists, so the purge must leave
    // its record alone
    let late = gateway.upload(b"three", "c.png", "image/png").await.unwrap();
    gate.release();

    let listing = listing.await.unwrap();
    assert_eq!(listing.purged, 1);

    let ids: Vec<String> = gateway
        .list()
        .await
        .unwrap()
        .entries
        .into_iter()
        .map(|entry| entry.record.id)
        .collect();
    assert!(ids.contains(&kept.id));
    assert!(ids.contains(&late.id), "record uploaded during a listing was lost");
    assert!(!ids.contains(&doomed.id));
}

#[tokio::test]
async fn test_listing_classifies_available_and_missing() {
    let (gateway, _blobs, remote) = test_gateway();

    let alive = gateway.upload(b"one", "a.png", "image/png").await.unwrap();
    let lost = gateway.upload(b"two", "b.png", "image/png").await.unwrap();

    remote.remove_out_of_band(&lost.remote_asset_id);

    let by_id = statuses(&gateway).await;
    assert_eq!(by_id.len(), 2);
    assert!(by_id.contains(&(alive.id, RemoteStatus::Available)));
    assert!(by_id.contains(&(lost.id, RemoteStatus::Missing)));
}

#[tokio::test]
async fn test_transport_failure_classifies_unknown_not_missing() {
    let (gateway, _blobs, remote) = test_gateway();

    let record = gateway.upload(b"one", "a.png", "image/png").await.unwrap();
    remote.fail_checks(true);

    let listing = gateway.list().await.unwrap();
    assert_eq!(listing.entries.len(), 1);
    assert_eq!(listing.entries[0].status, RemoteStatus::Unknown);

    // A degraded host must not make records look restorable, and it
    // never purges anything
    remote.fail_checks(false);
    let by_id = statuses(&gateway).await;
    assert!(by_id.contains(&(record.id, RemoteStatus::Available)));
}

#[tokio::test]
async fn test_listing_preserves_upload_order() {
    let (gateway, _blobs, _remote) = test_gateway();

    let a = gateway.upload(b"one", "a.png", "image/png").await.unwrap();
    let b = gateway.upload(b"two", "b.png", "image/png").await.unwrap();
    let c = gateway.upload(b"three", "c.png", "image/png").await.unwrap();

    let ids: Vec<String> = gateway
        .list()
        .await
        .unwrap()
        .entries
        .into_iter()
        .map(|entry| entry.record.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

// ====== Restore workflow ======

#[tokio::test]
async fn test_restore_changes_only_remote_fields_and_timestamp() {
    let (gateway, _blobs, remote) = test_gateway();

    let original = gateway.upload(b"bytes", "cat.png", "image/png").await.unwrap();
    remote.remove_out_of_band(&original.remote_asset_id);

    let restored = gateway.restore(&original.id).await.unwrap();

    assert_eq!(restored.id, original.id);
    assert_eq!(restored.local_filename, original.local_filename);
    assert_eq!(restored.original_name, original.original_name);
    assert_eq!(restored.checksum, original.checksum);
    assert_ne!(restored.remote_asset_id, original.remote_asset_id);
    assert!(restored.restored_at.is_some());

    // The re-uploaded copy carries the original bytes
    assert_eq!(remote.bytes(&restored.remote_asset_id).unwrap(), b"bytes");
}

#[tokio::test]
async fn test_restore_is_update_in_place_not_new_record() {
    let (gateway, _blobs, remote) = test_gateway();

    let record = gateway.upload(b"bytes", "cat.png", "image/png").await.unwrap();
    remote.remove_out_of_band(&record.remote_asset_id);
    gateway.restore(&record.id).await.unwrap();

    let entries = gateway.list().await.unwrap().entries;
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_restore_unknown_id() {
    let (gateway, _blobs, _remote) = test_gateway();

    let err = gateway.restore("no-such-id").await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { .. }));
}

#[tokio::test]
async fn test_restore_without_local_blob_is_terminal() {
    let (gateway, blobs, _remote) = test_gateway();

    let record = gateway.upload(b"bytes", "cat.png", "image/png").await.unwrap();
    blobs.remove_raw(&record.local_filename);

    let err = gateway.restore(&record.id).await.unwrap_err();
    assert!(matches!(err, Error::LocalBlobMissing { .. }));
}

#[tokio::test]
async fn test_restore_remote_failure_leaves_record_unchanged() {
    let (gateway, _blobs, remote) = test_gateway();

    let record = gateway.upload(b"bytes", "cat.png", "image/png").await.unwrap();
    remote.remove_out_of_band(&record.remote_asset_id);
    remote.fail_uploads(true);

    let err = gateway.restore(&record.id).await.unwrap_err();
    assert!(matches!(err, Error::RemoteUpload { .. }));

    remote.fail_uploads(false);
    let entries = gateway.list().await.unwrap().entries;
    assert_eq!(entries[0].record.remote_asset_id, record.remote_asset_id);
    assert!(entries[0].record.restored_at.is_none());
}

// ====== Delete workflow ======

#[tokio::test]
async fn test_delete_removes_everything() {
    let (gateway, blobs, remote) = test_gateway();

    let record = gateway.upload(b"bytes", "cat.png", "image/png").await.unwrap();
    let outcome = gateway.delete(&record.id).await.unwrap();

    assert_eq!(outcome.id, record.id);
    assert!(outcome.warnings.is_empty());
    assert!(blobs.is_empty());
    assert!(remote.is_empty());
    assert!(gateway.list().await.unwrap().entries.is_empty());
}

#[tokio::test]
async fn test_delete_removes_record_even_when_subdeletes_fail() {
    let (gateway, blobs, remote) = test_gateway();

    let record = gateway.upload(b"bytes", "cat.png", "image/png").await.unwrap();
    remote.fail_deletes(true);

    let outcome = gateway.delete(&record.id).await.unwrap();
    assert_eq!(outcome.warnings.len(), 1);

    // Record gone, blob gone, remote copy orphaned but tolerated
    assert!(gateway.list().await.unwrap().entries.is_empty());
    assert!(blobs.is_empty());
    assert_eq!(remote.len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_id() {
    let (gateway, _blobs, _remote) = test_gateway();

    let err = gateway.delete("no-such-id").await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { .. }));
}

// ====== Blob serving ======

#[tokio::test]
async fn test_read_blob() {
    let (gateway, _blobs, _remote) = test_gateway();

    let record = gateway.upload(b"bytes", "cat.png", "image/png").await.unwrap();

    let data = gateway.read_blob(&record.local_filename).await.unwrap();
    assert_eq!(data, b"bytes");

    let err = gateway.read_blob("missing_cat.png").await.unwrap_err();
    assert!(matches!(err, Error::BlobNotFound { .. }));

    // Traversal probes look exactly like misses
    let err = gateway.read_blob("../etc/passwd").await.unwrap_err();
    assert!(matches!(err, Error::BlobNotFound { .. }));
}

// ====== End-to-end lifecycle ======

#[tokio::test]
async fn test_lost_remote_copy_roundtrip() {
    let (gateway, _blobs, remote) = test_gateway();

    // Upload: implicitly available
    let record = gateway.upload(b"b", "cat.png", "image/png").await.unwrap();
    let by_id = statuses(&gateway).await;
    assert!(by_id.contains(&(record.id.clone(), RemoteStatus::Available)));

    // Remote copy vanishes out-of-band: next listing says missing
    remote.remove_out_of_band(&record.remote_asset_id);
    let by_id = statuses(&gateway).await;
    assert!(by_id.contains(&(record.id.clone(), RemoteStatus::Missing)));

    // Restore: available again under a fresh asset id
    let restored = gateway.restore(&record.id).await.unwrap();
    assert_ne!(restored.remote_asset_id, record.remote_asset_id);
    let by_id = statuses(&gateway).await;
    assert!(by_id.contains(&(record.id, RemoteStatus::Available)));
}
