//! HTTP API handlers organized by resource.

pub mod files;
pub mod images;
pub mod system;

// Re-export all handlers for use in routing
pub(crate) use files::serve_file;
pub(crate) use images::{delete_image, list_images, restore_image, upload_image};
pub(crate) use system::{health, metrics_text};
