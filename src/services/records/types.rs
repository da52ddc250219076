//! Record types for the metadata store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted metadata for one uploaded image.
///
/// A record is created only after both the local blob write and the remote
/// upload have succeeded, so `remote_asset_id` and `remote_url` are always
/// populated. The remote asset they point at may still have vanished
/// out-of-band; that is the condition the restore workflow repairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique identifier, assigned at upload time, immutable.
    pub id: String,
    /// Name of the blob in the local blob store. Unique within the store.
    pub local_filename: String,
    /// Client-supplied display name. Not used for lookup.
    pub original_name: String,
    /// Identifier returned by the remote asset host.
    pub remote_asset_id: String,
    /// Public URL returned by the remote asset host.
    pub remote_url: String,
    /// MIME type declared at upload time.
    pub content_type: String,
    /// Blob size in bytes.
    pub size: u64,
    /// BLAKE3 hex digest of the blob, for integrity checks before restore.
    pub checksum: String,
    /// When the image was first uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// When the image was last restored, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restored_at: Option<DateTime<Utc>>,
}
