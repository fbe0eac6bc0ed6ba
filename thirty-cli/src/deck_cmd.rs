//! Deck command - load a deck file and describe it

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use thirty_core::{load_deck, DeckStats, MalformedTokenPolicy, Rules};

#[derive(Args)]
pub struct DeckArgs {
    /// Deck file (comma-separated card values)
    #[arg(long, value_name = "FILE")]
    pub deck: PathBuf,

    /// Table size used for the per-seat breakdown
    #[arg(long, default_value = "4")]
    pub players: usize,

    /// Drop malformed and zero entries instead of reading them as 0
    #[arg(long)]
    pub skip_malformed: bool,
}

/// Run deck command
pub fn run(args: DeckArgs) -> Result<()> {
    let policy = if args.skip_malformed {
        MalformedTokenPolicy::Skip
    } else {
        MalformedTokenPolicy::CoerceToZero
    };

    let cards = load_deck(&args.deck, policy)
        .with_context(|| format!("Failed to load deck: {}", args.deck.display()))?;
    Rules::with_players(args.players).validate()?;
    tracing::info!("Loaded {} cards from {}", cards.len(), args.deck.display());

    let stats = DeckStats::from_cards(&cards);
    print_stats(&stats, args.players);

    Ok(())
}

fn print_stats(stats: &DeckStats, players: usize) {
    println!("\n=== Deck ===");
    println!("Cards:        {}", stats.total);
    println!("Awards:       {} ({:+} points)", stats.awards, stats.award_points);
    println!("Penalties:    {} ({:+} points)", stats.penalties, stats.penalty_points);
    if stats.zeros > 0 {
        println!("Zero cards:   {}", stats.zeros);
    }
    if let (Some(min), Some(max)) = (stats.min, stats.max) {
        println!("Range:        {} to {}", min, max);
    }
    println!(
        "Per seat:     {} cards ({} players, {} left over)",
        stats.total / players,
        players,
        stats.total % players
    );
}
