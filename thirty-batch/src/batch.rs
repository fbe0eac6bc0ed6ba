//! Batch play - many independent playouts against one card pool
//!
//! Level 1 - Orchestration and Level 2 - Phases

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rand::RngCore;
use rayon::prelude::*;

use thirty_core::{CardPool, ResultRecord};

use crate::config::BatchConfig;
use crate::game_runner::GameRunner;
use crate::summary::Summary;

/// Result of a batch
#[derive(Clone, Debug)]
pub struct BatchResult {
    /// Every playout, in game index order
    pub records: Vec<ResultRecord>,
    /// Winner histogram and average length
    pub summary: Summary,
    /// Wall-clock time spent playing
    pub elapsed: Duration,
}

impl BatchResult {
    /// Playouts per second
    pub fn games_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.records.len() as f64 / secs
        } else {
            0.0
        }
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a batch of playouts (Level 1 orchestration)
///
/// # Arguments
/// * `pool` - Shared card pool, dealt from once per game
/// * `config` - Batch configuration
pub fn run_batch<P: RngCore + Send>(pool: &CardPool<P>, config: &BatchConfig) -> BatchResult {
    tracing::info!(
        "Starting batch: {} games, {} players ({})",
        config.games,
        config.rules.player_count,
        if config.parallel { "parallel" } else { "sequential" }
    );

    let start = Instant::now();
    let runner = GameRunner::new(pool, config.rules, config.seed);
    let progress = Progress::new(config.games, config.progress_interval);

    let (records, summary) = if config.parallel {
        let records = execute_games_parallel(&runner, config.games, &progress);
        let summary = Summary::from_records_parallel(&records);
        (records, summary)
    } else {
        let records = execute_games(&runner, config.games, &progress);
        let summary = Summary::from_records(&records);
        (records, summary)
    };

    let elapsed = start.elapsed();
    tracing::info!(
        "Batch finished: {} games in {:.2}s",
        progress.completed(),
        elapsed.as_secs_f64()
    );

    BatchResult {
        records,
        summary,
        elapsed,
    }
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Execute games sequentially
fn execute_games<P: RngCore>(
    runner: &GameRunner<'_, P>,
    games: usize,
    progress: &Progress,
) -> Vec<ResultRecord> {
    (0..games)
        .map(|i| {
            let record = runner.play_game(i);
            progress.tick();
            record
        })
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel<P: RngCore + Send>(
    runner: &GameRunner<'_, P>,
    games: usize,
    progress: &Progress,
) -> Vec<ResultRecord> {
    (0..games)
        .into_par_iter()
        .map(|i| {
            let record = runner.play_game(i);
            progress.tick();
            record
        })
        .collect()
}

/// Completion counter shared by all workers
struct Progress {
    completed: AtomicUsize,
    total: usize,
    interval: usize,
}

impl Progress {
    fn new(total: usize, interval: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
            interval,
        }
    }

    /// Count one finished game, logging on every interval boundary
    fn tick(&self) -> usize {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.interval > 0 && done % self.interval == 0 {
            tracing::info!("Completed {}/{} games", done, self.total);
        }
        done
    }

    fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}
