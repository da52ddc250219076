//! Image lifecycle handlers.
//!
//! Handlers for uploading images, listing them with live remote status,
//! restoring lost remote copies, and deleting images.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use super::super::types::{
    DeleteImageResponse, ListImagesResponse, RestoreResponse, UploadResponse,
};
use super::super::{AppError, AppState, metrics};
use crate::constants::FALLBACK_UPLOAD_NAME;
use crate::error::Error;
use crate::gateway::RemoteStatus;

/// POST /upload - Accept a multipart upload under the `image` field.
///
/// The filename and content type come from the part headers; a missing
/// content type is guessed from the filename extension.
pub(crate) async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    metrics::record_operation("upload");

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidUpload(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_UPLOAD_NAME)
            .to_string();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| guess_content_type(&original_name));
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidUpload(format!("Failed to read upload body: {e}")))?;

        upload = Some((data, original_name, content_type));
        break;
    }

    let Some((data, original_name, content_type)) = upload else {
        return Err(Error::InvalidUpload("Missing multipart field 'image'".to_string()).into());
    };

    let image = state
        .gateway
        .upload(&data, &original_name, &content_type)
        .await?;
    metrics::record_upload_bytes(image.size);

    Ok((StatusCode::CREATED, Json(UploadResponse { image })))
}

/// GET /images - List all records, each tagged with its remote status.
///
/// Listing reconciles first: records whose local blob vanished are purged
/// and never reported.
pub(crate) async fn list_images(
    State(state): State<AppState>,
) -> Result<Json<ListImagesResponse>, AppError> {
    metrics::record_operation("list");

    let outcome = state.gateway.list().await?;
    metrics::record_purged(outcome.purged);
    metrics::set_record_count(outcome.entries.len());
    let inconclusive = outcome
        .entries
        .iter()
        .filter(|entry| entry.status == RemoteStatus::Unknown)
        .count();
    metrics::record_inconclusive_checks(inconclusive);

    Ok(Json(ListImagesResponse {
        images: outcome.entries,
        purged: outcome.purged,
    }))
}

/// POST /restore/{id} - Re-upload the local blob for a record whose
/// remote copy was lost.
pub(crate) async fn restore_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestoreResponse>, AppError> {
    metrics::record_operation("restore");

    let image = state.gateway.restore(&id).await?;
    Ok(Json(RestoreResponse { image }))
}

/// DELETE /images/{id} - Delete a record and both stored copies.
///
/// Succeeds once the record is gone; copies that could not be removed
/// are reported as warnings.
pub(crate) async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteImageResponse>, AppError> {
    metrics::record_operation("delete");

    let outcome = state.gateway.delete(&id).await?;
    Ok(Json(DeleteImageResponse {
        id: outcome.id,
        deleted: true,
        warnings: outcome.warnings,
    }))
}

/// Guess a content type from a filename extension.
fn guess_content_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type_from_extension() {
        assert_eq!(guess_content_type("cat.png"), "image/png");
        assert_eq!(guess_content_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("anim.gif"), "image/gif");
    }

    #[test]
    fn test_guess_content_type_unknown_falls_back() {
        assert_eq!(guess_content_type("upload"), "application/octet-stream");
        // An extension no mime registry knows; .xyz would not do, it maps
        // to chemical/x-xyz
        assert_eq!(guess_content_type("notes.zzzz"), "application/octet-stream");
    }
}
