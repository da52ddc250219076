//! Path utilities for pixgate data files.
//!
//! Provides centralized path resolution for everything the gateway keeps on
//! disk:
//!
//! # Base Directory
//! - [`get_data_dir`] - `~/.pixgate/` (base directory for all gateway data)
//!
//! # Data Files
//! - [`get_records_path`] - `~/.pixgate/records.json` (image record store)
//! - [`get_blobs_dir`] - `~/.pixgate/blobs/` (original upload bytes)
//!
//! # Configuration
//! - [`get_config_path`] - `~/.pixgate/pixgate.toml` (gateway settings)

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants;

/// Get the pixgate base directory.
///
/// Resolution order:
/// 1. `PIXGATE_HOME` environment variable (if set)
/// 2. `~/.pixgate/` (default)
///
/// This is the root directory for all gateway data and configuration.
/// CI/CD systems can override the location by setting `PIXGATE_HOME`.
pub fn get_data_dir() -> Result<PathBuf> {
    // Check for PIXGATE_HOME environment variable first
    if let Ok(home) = std::env::var("PIXGATE_HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    // Fall back to ~/.pixgate/
    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".pixgate"))
}

/// Get the record store path: `~/.pixgate/records.json`
pub fn get_records_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(constants::RECORDS_FILE))
}

/// Get the blob directory path: `~/.pixgate/blobs/`
pub fn get_blobs_dir() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(constants::BLOBS_DIR))
}

/// Get the gateway config path: `~/.pixgate/pixgate.toml`
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("pixgate.toml"))
}
