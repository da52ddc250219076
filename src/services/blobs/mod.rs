//! Local blob store for original upload bytes.
//!
//! Uploaded images are kept on disk as a recovery source for the remote
//! asset host. Blobs are addressed by a generated filename that is unique
//! within the store; the original client-supplied name only contributes a
//! sanitized suffix for operator readability.
//!
//! Security features:
//! - Filename validation (no separators, no `..`, no hidden files)
//! - Generated names combine a random identifier with the sanitized
//!   original name, so collisions are not possible in practice

mod backend;
mod filename;
mod filesystem;
mod memory;
mod store;

pub use backend::BlobBackend;
pub use filename::{generate_filename, validate_filename};
pub use filesystem::FilesystemBlobBackend;
pub use memory::MemoryBlobBackend;
pub use store::BlobStore;
