//! Thirty CLI - Command-line interface
//!
//! Commands:
//! - simulate: Run a batch of playouts and report winner statistics
//! - deck: Inspect a deck file

mod deck_cmd;
mod simulate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deck_cmd::DeckArgs;
use simulate_cmd::SimulateArgs;

#[derive(Parser)]
#[command(name = "thirty")]
#[command(about = "Race-to-30 card game playout simulator")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run many independent playouts
    Simulate(SimulateArgs),
    /// Show deck composition
    Deck(DeckArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate(args) => simulate_cmd::run(args, cli.seed),
        Commands::Deck(args) => deck_cmd::run(args),
    }
}
