//! Simulate command - run a batch of playouts
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_pool(), play_batch(), report_results(), save_results()
//! - Level 3: build_rules(), build_config()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use thirty_batch::{csv_log, run_batch, BatchConfig, BatchResult, Standing};
use thirty_core::{CardPool, MalformedTokenPolicy, Rules, SecureRandom, DRAW_TAG};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Deck file (comma-separated card values)
    #[arg(long, value_name = "FILE")]
    pub deck: PathBuf,

    /// Number of playouts
    #[arg(long, default_value = "100000")]
    pub games: usize,

    /// Players at the table
    #[arg(long, default_value = "4")]
    pub players: usize,

    /// Score that wins the game
    #[arg(long, default_value = "30")]
    pub target: u32,

    /// Leader score at which penalties take priority
    #[arg(long, default_value = "20")]
    pub penalty_threshold: u32,

    /// Cards drawn into hand at the start
    #[arg(long, default_value = "5")]
    pub hand_size: usize,

    /// CSV log to append results to
    #[arg(long, value_name = "FILE", default_value = "results.csv")]
    pub csv: PathBuf,

    /// Do not write the CSV log
    #[arg(long)]
    pub no_csv: bool,

    /// Log progress every N completed games (0 disables)
    #[arg(long, default_value = "10000")]
    pub progress_interval: usize,

    /// Run on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Drop malformed and zero deck entries instead of reading them as 0
    #[arg(long)]
    pub skip_malformed: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// This function reads like a table of contents:
/// 1. Validate the rules
/// 2. Load the deck into a card pool
/// 3. Play the batch
/// 4. Report and persist results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let rules = build_rules(&args)?;
    let config = build_config(&args, rules, seed);
    tracing::info!(
        "Simulating {} games: {} players, target {}, penalty threshold {}, hand size {}",
        config.games,
        rules.player_count,
        rules.target_score,
        rules.penalty_threshold,
        rules.hand_size
    );

    let result = match config.pool_seed() {
        Some(s) => play_batch(&load_pool(&args, ChaCha8Rng::seed_from_u64(s))?, &config)?,
        None => play_batch(&load_pool(&args, SecureRandom::new())?, &config)?,
    };
    tracing::info!(
        "Finished {} games in {:.2}s",
        result.summary.games,
        result.elapsed.as_secs_f64()
    );

    report_results(&result, &args);

    if !args.no_csv {
        save_results(&result, &args.csv)?;
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the deck file into a shuffled card pool
fn load_pool<R: RngCore>(args: &SimulateArgs, rng: R) -> Result<CardPool<R>> {
    let policy = if args.skip_malformed {
        MalformedTokenPolicy::Skip
    } else {
        MalformedTokenPolicy::CoerceToZero
    };

    let pool = CardPool::load(&args.deck, policy, rng)
        .with_context(|| format!("Failed to load deck: {}", args.deck.display()))?;
    tracing::info!("Loaded {} cards from {}", pool.len(), args.deck.display());
    Ok(pool)
}

/// Check the deck against the rules and play every game
fn play_batch<R: RngCore + Send>(pool: &CardPool<R>, config: &BatchConfig) -> Result<BatchResult> {
    config.rules.validate_deck(pool.len())?;
    Ok(run_batch(pool, config))
}

/// Report batch results
fn report_results(result: &BatchResult, args: &SimulateArgs) {
    if args.json {
        print_json_results(result, args);
    } else {
        print_text_results(result, args);
    }
}

/// Append every record to the CSV log
fn save_results(result: &BatchResult, path: &Path) -> Result<()> {
    csv_log::append(path, &result.records)
        .with_context(|| format!("Failed to write results: {}", path.display()))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Rules from command-line arguments
fn build_rules(args: &SimulateArgs) -> Result<Rules> {
    let rules = Rules {
        player_count: args.players,
        target_score: args.target,
        penalty_threshold: args.penalty_threshold,
        hand_size: args.hand_size,
    };
    rules.validate()?;
    Ok(rules)
}

/// Batch configuration from command-line arguments
fn build_config(args: &SimulateArgs, rules: Rules, seed: Option<u64>) -> BatchConfig {
    BatchConfig {
        games: args.games,
        rules,
        parallel: !args.sequential,
        progress_interval: args.progress_interval,
        seed,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Display label for a histogram row
fn standing_label(standing: &Standing) -> String {
    if standing.tag == DRAW_TAG {
        "Draw".to_string()
    } else {
        format!("Player {}", standing.tag)
    }
}

/// Print results as JSON
fn print_json_results(result: &BatchResult, args: &SimulateArgs) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: u64,
        players: usize,
        draws: u64,
        avg_turns: f64,
        elapsed_secs: f64,
        games_per_second: f64,
        standings: &'a [Standing],
    }

    let standings = result.summary.standings();
    let output = JsonOutput {
        total_games: result.summary.games,
        players: args.players,
        draws: result.summary.draws(),
        avg_turns: result.summary.average_turns(),
        elapsed_secs: result.elapsed.as_secs_f64(),
        games_per_second: result.games_per_second(),
        standings: &standings,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(result: &BatchResult, args: &SimulateArgs) {
    let summary = &result.summary;

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", summary.games);
    println!("Players:     {}", args.players);

    println!("\nWinners:");
    for standing in summary.standings() {
        println!(
            "  {:<10} {:>10} ({:.2}%)",
            standing_label(&standing),
            standing.count,
            standing.percentage
        );
    }

    println!("\nAvg turns:   {:.2}", summary.average_turns());
    println!(
        "Elapsed:     {:.2}s ({:.0} games/s)",
        result.elapsed.as_secs_f64(),
        result.games_per_second()
    );
}

// ============================================================================
// TESTS
// ============================================================================
