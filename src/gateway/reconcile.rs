//! Reconciliation engine.
//!
//! Runs on every listing request, in two passes:
//!
//! 1. **Sync pass** - drops records whose local blob no longer exists.
//!    Destructive and immediate: the metadata is gone even if the remote
//!    copy is still alive, because without local bytes the record can
//!    never be restored.
//! 2. **Classification pass** - queries the asset host for each surviving
//!    record and derives a [`RemoteStatus`]. Read-only, concurrent with a
//!    bounded fan-out, and order-preserving.
//!
//! The sync pass always completes before classification starts, so
//! classification reads the post-sync record set.

use std::collections::HashSet;

use futures::StreamExt;
use futures::stream;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::services::blobs::BlobStore;
use crate::services::records::{ImageRecord, RecordStore};
use crate::services::remote::AssetHostClient;

use super::types::{ListedImage, Reconciliation, RemoteStatus};

/// Runs both passes and returns the decorated record set.
pub(super) async fn reconcile(
    records: &RecordStore,
    blobs: &BlobStore,
    remote: &AssetHostClient,
    check_concurrency: usize,
) -> Result<Reconciliation> {
    let (kept, purged) = sync_records(records, blobs).await?;
    let entries = classify(remote, kept, check_concurrency).await;
    Ok(Reconciliation { entries, purged })
}

/// Sync pass: keep only records whose blob is still on disk.
///
/// Orphans are removed one id at a time through the store's serialized
/// mutations. A whole-collection write-back of the kept set would erase
/// any record upserted between the snapshot and the write; per-id
/// removal touches nothing but the identified orphans. Healthy listings
/// never write at all.
async fn sync_records(
    records: &RecordStore,
    blobs: &BlobStore,
) -> Result<(Vec<ImageRecord>, usize)> {
    let all = records
        .get_all()
        .await
        .map_err(|e| Error::store_unavailable(format!("{e:#}")))?;
    let present: HashSet<String> = blobs.list().await?.into_iter().collect();

    let (kept, purged): (Vec<_>, Vec<_>) = all
        .into_iter()
        .partition(|record| present.contains(&record.local_filename));

    for record in &purged {
        warn!(
            id = %record.id,
            filename = %record.local_filename,
            remote_asset_id = %record.remote_asset_id,
            "Purging record whose local blob vanished"
        );
        records
            .remove(&record.id)
            .await
            .map_err(|e| Error::store_unavailable(format!("{e:#}")))?;
    }

    Ok((kept, purged.len()))
}

/// Classification pass: derive a status per record from a live existence
/// check. Checks run concurrently, bounded by `check_concurrency`, and
/// results keep the record-store order.
async fn classify(
    remote: &AssetHostClient,
    records: Vec<ImageRecord>,
    check_concurrency: usize,
) -> Vec<ListedImage> {
    stream::iter(records)
        .map(|record| {
            let remote = remote.clone();
            async move {
                let status = match remote.exists(&record.remote_asset_id).await {
                    Ok(true) => RemoteStatus::Available,
                    Ok(false) => RemoteStatus::Missing,
                    Err(e) => {
                        // Inconclusive, not missing: transient network
                        // trouble must not look like data loss
                        debug!(
                            id = %record.id,
                            remote_asset_id = %record.remote_asset_id,
                            error = format!("{e:#}"),
                            "Remote existence check inconclusive"
                        );
                        RemoteStatus::Unknown
                    },
                };
                ListedImage { record, status }
            }
        })
        .buffered(check_concurrency.max(1))
        .collect()
        .await
}
