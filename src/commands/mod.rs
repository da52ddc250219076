//! CLI command implementations for pixgate.
//!
//! Each submodule implements a specific command:
//!
//! - [`serve`] - Run the gateway server until shutdown
//! - [`reconcile`] - One-shot reconciliation pass with a printed summary

pub mod reconcile;
pub mod serve;
