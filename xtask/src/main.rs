//! xtask - Development task runner for sparse-segtree
//!
//! Usage:
//!   cargo run -p xtask -- smoke [--scenario <yaml>] [options]

mod smoke;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for sparse-segtree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a smoke scenario of inserts and checked queries against the tree
    Smoke(smoke::SmokeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Smoke(args) => smoke::run(&args),
    }
}
