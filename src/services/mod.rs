//! Backing services for the gateway.
//!
//! Three independently-failing stores, each behind a pluggable backend
//! trait so tests can swap in in-memory fakes:
//!
//! - [`records`] - Flat metadata record store (JSON file or memory)
//! - [`blobs`] - Local blob store for original upload bytes
//! - [`remote`] - Remote asset host client (HTTP or in-process fake)

pub mod blobs;
pub mod records;
pub mod remote;
