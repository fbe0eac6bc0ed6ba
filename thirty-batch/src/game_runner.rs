//! Game runner - executes single playouts
//!
//! Level 3 - Step-level implementation

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use thirty_core::{CardPool, GameEngine, ResultRecord, Rules, SecureRandom};

/// Plays games against a shared card pool
pub struct GameRunner<'a, P = SecureRandom> {
    pool: &'a CardPool<P>,
    rules: Rules,
    /// Base seed; game `i` uses `seed + i` (None = OS CSPRNG)
    seed: Option<u64>,
}

impl<'a, P: RngCore> GameRunner<'a, P> {
    /// Create a new game runner
    pub fn new(pool: &'a CardPool<P>, rules: Rules, seed: Option<u64>) -> Self {
        Self { pool, rules, seed }
    }

    /// Play game number `game_index` to completion
    pub fn play_game(&self, game_index: usize) -> ResultRecord {
        let record = match self.seed {
            Some(base) => {
                let rng = ChaCha8Rng::seed_from_u64(base.wrapping_add(game_index as u64));
                GameEngine::new(self.pool, self.rules, rng).simulate()
            }
            None => GameEngine::new(self.pool, self.rules, SecureRandom::new()).simulate(),
        };

        tracing::debug!(
            "Game {}: {} in {} turns",
            game_index,
            record.winner_tag(),
            record.turns
        );

        record
    }

    /// Get rules
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
}
