//! Types produced by the gateway workflows.

use serde::{Deserialize, Serialize};

use crate::services::records::ImageRecord;

/// Liveness of a record's remote copy, recomputed on every listing.
///
/// Never persisted; between listings it is stale by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    /// The asset host positively confirmed the copy is present.
    Available,
    /// The asset host positively confirmed the copy is gone. The record
    /// is a candidate for restore.
    Missing,
    /// No definitive answer was obtained (timeout, transport failure).
    /// Not the same as missing: restoring on this signal would re-upload
    /// assets that are still alive.
    Unknown,
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::Missing => "missing",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One record decorated with its freshly computed remote status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedImage {
    #[serde(flatten)]
    pub record: ImageRecord,
    pub status: RemoteStatus,
}

/// Result of a listing call: the decorated post-sync record set, plus how
/// many orphaned records the sync pass purged.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub entries: Vec<ListedImage>,
    pub purged: usize,
}

/// Result of a delete: the record itself is always removed; failures of
/// the remote and local sub-deletes are reported as warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Id of the removed record.
    pub id: String,
    /// Human-readable descriptions of sub-deletes that failed.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RemoteStatus::Available).unwrap(),
            "\"available\""
        );
        assert_eq!(
            serde_json::to_string(&RemoteStatus::Missing).unwrap(),
            "\"missing\""
        );
        assert_eq!(
            serde_json::to_string(&RemoteStatus::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_listed_image_flattens_record() {
        let entry = ListedImage {
            record: ImageRecord {
                id: "img-1".to_string(),
                local_filename: "abc_cat.png".to_string(),
                original_name: "cat.png".to_string(),
                remote_asset_id: "remote-1".to_string(),
                remote_url: "https://assets.example.com/remote-1".to_string(),
                content_type: "image/png".to_string(),
                size: 3,
                checksum: "deadbeef".to_string(),
                uploaded_at: Utc::now(),
                restored_at: None,
            },
            status: RemoteStatus::Available,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "img-1");
        assert_eq!(json["status"], "available");
        // Flattened, not nested under "record"
        assert!(json.get("record").is_none());
    }
}
