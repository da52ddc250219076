//! pixgate CLI entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use pixgate::commands::{self, reconcile::ReconcileArgs, serve::ServeArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Self-hosted image gateway mirrored to a remote asset host.
#[derive(Parser)]
#[command(name = "pixgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve(ServeArgs),
    /// Run one reconciliation pass and print a summary
    Reconcile(ReconcileArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            init_tracing(args.log_json);
            commands::serve::execute(args).await
        },
        Commands::Reconcile(args) => {
            init_tracing(false);
            commands::reconcile::execute(args).await
        },
    }
}

/// Initialize stdout logging, honoring `RUST_LOG` when set.
fn init_tracing(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pixgate=info,tower_http=warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
