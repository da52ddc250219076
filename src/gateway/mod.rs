//! Image gateway core.
//!
//! Coordinates three independently-failing stores: the metadata record
//! store, the local blob store, and the remote asset host. The gateway
//! owns the workflows (upload, listing with reconciliation, restore,
//! delete) and the consistency policy between the stores; there are no
//! cross-store transactions, only an explicit cleanup/repair discipline:
//!
//! - A record is created only after both copies of the image exist.
//! - Listing purges records whose local blob vanished, then classifies
//!   each survivor against the asset host.
//! - Restore re-uploads the local blob when the remote copy is lost.
//! - Delete removes the record even when cleanup of either copy fails.

mod reconcile;
mod service;
mod types;

#[cfg(test)]
mod tests;

// Re-export the public API
pub use service::Gateway;
pub use types::{DeleteOutcome, ListedImage, Reconciliation, RemoteStatus};
