//! Remote asset host client with pluggable backends.
//!
//! Adapter to the external cloud image host: upload, existence check,
//! delete. Supports multiple backends:
//!
//! - **HttpAssetHost**: Talks to a real asset host over HTTPS (default)
//! - **MemoryAssetHost**: In-process fake with failure injection (testing)
//!
//! The existence check deliberately distinguishes a definitive "not found"
//! answer from a transport failure: callers must treat the latter as
//! inconclusive rather than missing, or transient network trouble would
//! trigger false restores.

mod backend;
mod client;
mod http;
mod memory;

pub use backend::{AssetHostBackend, RemoteAsset};
pub use client::AssetHostClient;
pub use http::HttpAssetHost;
pub use memory::MemoryAssetHost;
