//! Configuration types for the pixgate gateway.
//!
//! This module provides configuration structs for loading and validating
//! gateway settings from TOML files. It includes:
//!
//! - [`Config`] - Root configuration struct
//! - [`ServerConfig`] - HTTP server settings
//! - [`StorageConfig`] - Local data directory settings
//! - [`RemoteConfig`] - Remote asset host connection settings
//! - [`LimitsConfig`] - Upload and concurrency limits
//!
//! All configuration types support serde deserialization and provide
//! sensible defaults suitable for development use. Remote credentials can
//! be injected through `PIXGATE_REMOTE_URL` and `PIXGATE_REMOTE_API_KEY`
//! so they never have to live in the config file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// pixgate.toml configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

/// Local storage configuration.
///
/// When `data_dir` is unset, paths are resolved through [`crate::paths`]
/// (`PIXGATE_HOME` or `~/.pixgate`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Remote asset host configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the asset host API (e.g., "https://assets.example.com").
    #[serde(default)]
    pub base_url: String,
    /// Bearer token for the asset host API.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout for asset host calls.
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

/// Upload and concurrency limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Maximum concurrent remote existence checks during a listing.
    #[serde(default = "default_check_concurrency")]
    pub remote_check_concurrency: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            remote_check_concurrency: default_check_concurrency(),
        }
    }
}

fn default_port() -> u16 {
    constants::DEFAULT_PORT
}

fn default_bind() -> String {
    constants::DEFAULT_BIND.to_string()
}

fn default_remote_timeout_secs() -> u64 {
    constants::DEFAULT_REMOTE_TIMEOUT_SECS
}

fn default_max_upload_bytes() -> u64 {
    constants::DEFAULT_MAX_UPLOAD_BYTES
}

fn default_check_concurrency() -> usize {
    constants::DEFAULT_CHECK_CONCURRENCY
}

impl Config {
    /// Load configuration from the default location (`~/.pixgate/pixgate.toml`).
    ///
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = crate::paths::get_config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default().with_env_overrides())
        }
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config.with_env_overrides())
    }

    /// Apply environment variable overrides to the remote section.
    ///
    /// `PIXGATE_REMOTE_URL` and `PIXGATE_REMOTE_API_KEY` take precedence
    /// over file values so credentials can stay out of the config file.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PIXGATE_REMOTE_URL")
            && !url.is_empty()
        {
            self.remote.base_url = url;
        }
        if let Ok(key) = std::env::var("PIXGATE_REMOTE_API_KEY")
            && !key.is_empty()
        {
            self.remote.api_key = key;
        }
        self
    }

    /// Validate configuration with comprehensive checks.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Port 0
    /// - Missing or unparsable remote base URL
    /// - Zero upload ceiling or zero check concurrency
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Validate server configuration
        if self.server.port == 0 {
            errors.push("server.port cannot be 0. Use a valid port number (1-65535)".to_string());
        }
        if self.server.port < 1024 && self.server.port > 0 {
            warnings.push(format!(
                "server.port {} is a system/privileged port (< 1024); ports >= 1024 avoid permission issues",
                self.server.port
            ));
        }

        // 2. Validate remote asset host settings
        if self.remote.base_url.is_empty() {
            errors.push(
                "remote.base_url is required. Set it in pixgate.toml or via PIXGATE_REMOTE_URL"
                    .to_string(),
            );
        } else if let Err(e) = url::Url::parse(&self.remote.base_url) {
            errors.push(format!(
                "remote.base_url '{}' is not a valid URL: {e}",
                self.remote.base_url
            ));
        }
        if self.remote.api_key.is_empty() {
            warnings.push(
                "remote.api_key is empty; requests to the asset host will be unauthenticated"
                    .to_string(),
            );
        }
        if self.remote.timeout_secs == 0 {
            errors.push("remote.timeout_secs cannot be 0".to_string());
        } else if self.remote.timeout_secs > 60 {
            warnings.push(format!(
                "remote.timeout_secs {} is very high; listing latency is bounded by this timeout",
                self.remote.timeout_secs
            ));
        }

        // 3. Validate limits
        if self.limits.max_upload_bytes == 0 {
            errors.push("limits.max_upload_bytes cannot be 0".to_string());
        } else if self.limits.max_upload_bytes > 100 * 1024 * 1024 {
            warnings.push(format!(
                "limits.max_upload_bytes {} exceeds 100 MiB; large uploads are buffered in memory",
                self.limits.max_upload_bytes
            ));
        }
        if self.limits.remote_check_concurrency == 0 {
            errors.push("limits.remote_check_concurrency cannot be 0".to_string());
        } else if self.limits.remote_check_concurrency > 64 {
            warnings.push(format!(
                "limits.remote_check_concurrency {} may overwhelm the remote asset host",
                self.limits.remote_check_concurrency
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!("Invalid configuration:\n  - {}", errors.join("\n  - "));
        }

        Ok(ValidationResult { warnings })
    }
}
