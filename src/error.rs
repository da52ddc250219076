//! Gateway error types for typed error handling.
//!
//! This module provides structured errors for the image gateway,
//! enabling consistent HTTP status mapping and informative messages.

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Gateway errors with structured context.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Upload rejected before any storage write (missing file, empty body).
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// Upload rejected because the media type is not an image.
    #[error("unsupported media type: {content_type}")]
    UnsupportedMediaType { content_type: String },

    /// Upload rejected because the body exceeds the configured ceiling.
    #[error("upload of {size} bytes exceeds limit of {limit} bytes")]
    UploadTooLarge { size: u64, limit: u64 },

    /// No image record exists for the given id.
    #[error("image record not found: {id}")]
    RecordNotFound { id: String },

    /// The record exists but its local blob has vanished. Terminal for
    /// restore purposes; there is no tertiary backup.
    #[error("local blob '{filename}' missing for record {id}")]
    LocalBlobMissing { id: String, filename: String },

    /// No blob with the given filename exists in the local store.
    #[error("blob not found: {filename}")]
    BlobNotFound { filename: String },

    /// The remote asset host rejected or failed an upload. Covers both
    /// transport and service-side failures on the mutation path.
    #[error("remote upload failed: {reason}")]
    RemoteUpload { reason: String },

    /// The record store medium cannot be read or written.
    #[error("record store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// Unexpected failure in a backing service.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Helper constructors for ergonomic error creation.
impl Error {
    /// Create a record not found error.
    pub fn record_not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    /// Create a local blob missing error.
    pub fn local_blob_missing(id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::LocalBlobMissing {
            id: id.into(),
            filename: filename.into(),
        }
    }

    /// Create a blob not found error.
    pub fn blob_not_found(filename: impl Into<String>) -> Self {
        Self::BlobNotFound {
            filename: filename.into(),
        }
    }

    /// Create a remote upload error.
    pub fn remote_upload(reason: impl Into<String>) -> Self {
        Self::RemoteUpload {
            reason: reason.into(),
        }
    }

    /// Create a store unavailable error.
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
        }
    }
}

/// Convert gateway error to HTTP status code.
impl Error {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidUpload(_)
            | Self::UnsupportedMediaType { .. }
            | Self::UploadTooLarge { .. } => 400,
            Self::RecordNotFound { .. }
            | Self::LocalBlobMissing { .. }
            | Self::BlobNotFound { .. } => 404,
            Self::RemoteUpload { .. } | Self::StoreUnavailable { .. } | Self::Internal(_) => 500,
        }
    }
}
