//! One-shot reconciliation command.
//!
//! Runs the same reconciliation pass as `GET /images` without starting
//! the server: purges records whose local blob vanished, classifies the
//! rest against the remote asset host, and prints a summary. Useful from
//! cron or before taking the gateway down.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::gateway::{Gateway, RemoteStatus};

/// Arguments for `pixgate reconcile`.
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Path to a pixgate.toml configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Data directory for records and blobs (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Execute one reconciliation pass and print a summary.
pub async fn execute(args: ReconcileArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = Some(dir);
    }
    config.validate()?;

    let gateway = Gateway::open(&config)?;
    let outcome = gateway.list().await?;

    let mut available = 0usize;
    let mut missing = 0usize;
    let mut unknown = 0usize;
    for entry in &outcome.entries {
        match entry.status {
            RemoteStatus::Available => available += 1,
            RemoteStatus::Missing => missing += 1,
            RemoteStatus::Unknown => unknown += 1,
        }
    }

    println!("Reconciliation complete");
    println!("=======================");
    println!("Records:    {}", outcome.entries.len());
    println!("Available:  {available}");
    println!("Missing:    {missing}");
    println!("Unknown:    {unknown}");
    println!("Purged:     {}", outcome.purged);

    if missing > 0 {
        println!();
        println!("Records with a lost remote copy (restore via POST /restore/{{id}}):");
        for entry in outcome
            .entries
            .iter()
            .filter(|e| e.status == RemoteStatus::Missing)
        {
            println!("  {}  {}", entry.record.id, entry.record.original_name);
        }
    }

    Ok(())
}
