//! Metadata record store with pluggable backends.
//!
//! Tracks one [`ImageRecord`] per uploaded image in a single flat
//! collection. Supports multiple backends:
//!
//! - **JsonFileBackend**: Persistent JSON-array file (default for the gateway)
//! - **MemoryRecordBackend**: Fast, non-persistent storage (ideal for testing)
//!
//! # Example
//!
//! ```ignore
//! use pixgate::services::records::{RecordStore, ImageRecord};
//!
//! // In-memory (testing/embedding)
//! let records = RecordStore::memory();
//! records.upsert(record).await?;
//!
//! // Persistent (production)
//! let records = RecordStore::file("~/.pixgate/records.json")?;
//! ```
//!
//! # Custom Backends
//!
//! Implement the `RecordBackend` trait to use custom persistence:
//!
//! ```ignore
//! use pixgate::services::records::{RecordBackend, RecordStore};
//!
//! struct PostgresBackend { /* ... */ }
//! impl RecordBackend for PostgresBackend { /* ... */ }
//!
//! let records = RecordStore::custom(PostgresBackend::new());
//! ```

mod backend;
mod json_file;
mod memory;
mod store;
mod types;


// Re-export the public API
pub use backend::RecordBackend;
pub use json_file::JsonFileBackend;
pub use memory::MemoryRecordBackend;
pub use store::RecordStore;
pub use types::ImageRecord;
