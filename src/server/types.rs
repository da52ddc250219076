//! Request and response types for the HTTP API.
//!
//! All types use serde for JSON serialization. Response types derive
//! `Deserialize` as well so integration tests can parse them back.

use serde::{Deserialize, Serialize};

use crate::gateway::ListedImage;
use crate::services::records::ImageRecord;

/// GET /health response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ready" once the server is accepting requests.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
}

/// GET /images response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListImagesResponse {
    /// Records in upload order, each tagged with its remote status.
    pub images: Vec<ListedImage>,
    /// How many stale records the listing purged before classifying.
    pub purged: usize,
}

/// POST /upload response.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub image: ImageRecord,
}

/// POST /restore/{id} response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RestoreResponse {
    pub image: ImageRecord,
}

/// DELETE /images/{id} response.
///
/// Deletion succeeds even when a copy could not be removed; anything
/// skipped shows up in `warnings`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteImageResponse {
    pub id: String,
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Error body returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
