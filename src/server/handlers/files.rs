//! Blob serving handler.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use super::super::{AppError, AppState, metrics};

/// GET /files/{filename} - Serve a stored blob.
///
/// The content type is guessed from the filename extension. Stored
/// filenames embed a random prefix and never change content, so the
/// response is marked immutable for caches.
pub(crate) async fn serve_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    metrics::record_operation("serve");

    let data = state.gateway.read_blob(&filename).await?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    let headers = [
        (header::CONTENT_TYPE, mime.essence_str().to_string()),
        (
            header::CACHE_CONTROL,
            "public, max-age=31536000, immutable".to_string(),
        ),
    ];
    Ok((headers, data).into_response())
}
