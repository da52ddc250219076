//! Gateway server command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::server;

/// Arguments for `pixgate serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to a pixgate.toml configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Data directory for records and blobs (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Start the gateway server and block until shutdown.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = Some(dir);
    }

    server::run(config).await
}
