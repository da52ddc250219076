//! pixgate - self-hosted image gateway mirrored to a remote asset host.
//!
//! pixgate keeps two copies of every uploaded image: a blob on local disk
//! and an asset on a remote host, with a JSON record store mapping each
//! image id to both. Listings reconcile the records against reality on
//! every request, and a remote copy that went missing can be restored
//! from the local blob without changing the record's identity.
//!
//! Modules:
//!
//! - [`gateway`] - Upload, listing, restore, and delete workflows
//! - [`services`] - Record store, blob store, and asset host backends
//! - [`server`] - HTTP API (axum router, handlers, metrics)
//! - [`commands`] - CLI commands (`serve`, `reconcile`)
//! - [`config`] - TOML configuration with env overrides
//! - [`error`] - Typed errors with HTTP status mapping

#![deny(unsafe_code)]

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod paths;
pub mod server;
pub mod services;
