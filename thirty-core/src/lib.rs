//! Thirty Core - Card pool, players and the playout engine
//!
//! This crate provides the core game logic for Thirty:
//! - Cards, hands and the shared card pool (load, deal, reshuffle)
//! - Uniform random sources (OS CSPRNG, or any seeded PRNG for tests)
//! - Players and the rule-based turn policy
//! - The turn loop that plays one game to a result record

pub mod cards;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
pub mod random;
pub mod rules;

// Re-exports for convenient access
pub use cards::{Card, Hand};
pub use deck::{distribute, load_deck, parse_deck, CardPool, DeckStats, MalformedTokenPolicy};
pub use error::{DeckError, RulesError};
pub use game::{GameEngine, GameState, GameStatus, Outcome, ResultRecord, DRAW_TAG};
pub use player::{find_leader, Decision, Player};
pub use random::{SecureRandom, UniformRandomSource};
pub use rules::{seat_tag, Rules, HAND_SIZE, PENALTY_THRESHOLD, TARGET_SCORE};
