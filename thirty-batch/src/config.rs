//! Configuration types for batch runs
//!
//! Level 4 - Utilities and configuration

use thirty_core::Rules;

/// Completions between progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Mixed into the batch seed to seed the card pool apart from the games
const POOL_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Batch configuration
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of independent playouts
    pub games: usize,
    /// Rules shared by every playout
    pub rules: Rules,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Log progress every this many completed games (0 = never)
    pub progress_interval: usize,
    /// Random seed for reproducible turn decisions (None = OS CSPRNG)
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            games: 100_000,
            rules: Rules::default(),
            parallel: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            seed: None,
        }
    }
}

impl BatchConfig {
    /// Create config for the given number of games
    pub fn new(games: usize) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    /// Set game rules
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run games one after another on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set progress interval
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Seed for the card pool's shuffle RNG.
    ///
    /// Games use `seed + i`, so the pool gets the seed XOR a fixed salt to
    /// keep its stream off every game's stream.
    pub fn pool_seed(&self) -> Option<u64> {
        self.seed.map(|s| s ^ POOL_SEED_SALT)
    }
}
