//! Hardstop CLI - Drive the in-memory shop from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Print the demo dataset
//! hardstop-cli seed
//!
//! # Replay a script on top of the demo dataset
//! hardstop-cli replay orders.yaml
//!
//! # Replay on an empty store, skipping rejected steps
//! hardstop-cli replay orders.yaml --empty --keep-going
//!
//! # Audit the demo dataset, or the result of a script
//! hardstop-cli audit
//! hardstop-cli audit orders.yaml --empty
//! ```
//!
//! # Commands
//!
//! - `seed` - Print the demo dataset as JSON
//! - `replay` - Apply a YAML script and print the resulting store
//! - `audit` - Check referential integrity and print the findings
//!
//! Logs go to stderr and are filtered by `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod script;

#[derive(Parser)]
#[command(name = "hardstop-cli")]
#[command(author, version, about = "Hardstop shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demo dataset
    Seed,
    /// Replay a YAML script against the shop
    Replay {
        /// Script to replay
        file: PathBuf,

        /// Start from an empty store instead of the demo dataset
        #[arg(long)]
        empty: bool,

        /// Skip rejected steps instead of stopping at the first one
        #[arg(long)]
        keep_going: bool,
    },
    /// Audit referential integrity
    Audit {
        /// Script to replay before auditing
        file: Option<PathBuf>,

        /// Start from an empty store instead of the demo dataset
        #[arg(long)]
        empty: bool,

        /// Skip rejected steps instead of stopping at the first one
        #[arg(long)]
        keep_going: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hardstop_shop=info,hardstop_cli=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run().await?,
        Commands::Replay {
            file,
            empty,
            keep_going,
        } => commands::replay::run(&file, empty, keep_going).await?,
        Commands::Audit {
            file,
            empty,
            keep_going,
        } => commands::audit::run(file.as_deref(), empty, keep_going).await?,
    }
    Ok(())
}
