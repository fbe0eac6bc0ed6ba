//! Canonical deck loading and the shared card pool
//!
//! The pool owns the deck for a whole batch. Each game asks it for a fresh
//! deal; dealing and reshuffling happen under one lock so concurrent games
//! never see a half-shuffled order.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use rand::RngCore;

use crate::cards::Card;
use crate::error::DeckError;
use crate::random::{SecureRandom, UniformRandomSource};

// ============================================================================
// PARSING
// ============================================================================

/// What to do with a deck token that is not an integer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedTokenPolicy {
    /// Keep the token as a zero-value card
    #[default]
    CoerceToZero,
    /// Drop the token, along with literal zeros
    Skip,
}

/// Parse a comma-separated list of card values.
///
/// Blank tokens (trailing commas, line breaks) are ignored.
pub fn parse_deck(text: &str, policy: MalformedTokenPolicy) -> Vec<Card> {
    let mut cards = Vec::new();

    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match (token.parse::<i32>(), policy) {
            (Ok(0), MalformedTokenPolicy::Skip) => {
                tracing::warn!("Skipping zero-value deck entry");
            }
            (Ok(value), _) => cards.push(Card(value)),
            (Err(_), MalformedTokenPolicy::CoerceToZero) => {
                tracing::warn!("Malformed deck entry {:?}, using 0", token);
                cards.push(Card(0));
            }
            (Err(_), MalformedTokenPolicy::Skip) => {
                tracing::warn!("Skipping malformed deck entry {:?}", token);
            }
        }
    }

    cards
}

/// Read and parse a deck file
pub fn load_deck(path: &Path, policy: MalformedTokenPolicy) -> Result<Vec<Card>, DeckError> {
    let content = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cards = parse_deck(&content, policy);
    if cards.is_empty() {
        return Err(DeckError::Empty);
    }

    tracing::info!("Loaded {} cards from {}", cards.len(), path.display());
    Ok(cards)
}

// ============================================================================
// DEALING
// ============================================================================

/// Deal `order` to seats in descending round-robin starting at `start_seat`.
///
/// The seat index decrements after each card and wraps from 0 to
/// `player_count - 1`. Returns one queue per seat, in seat order.
pub fn distribute(order: &[Card], player_count: usize, start_seat: usize) -> Vec<VecDeque<Card>> {
    assert!(player_count > 0, "cannot deal to zero players");
    assert!(start_seat < player_count, "start seat {} out of range", start_seat);

    let per_seat = order.len() / player_count + 1;
    let mut hands = vec![VecDeque::with_capacity(per_seat); player_count];
    let mut seat = start_seat;

    for &card in order {
        hands[seat].push_back(card);
        seat = if seat == 0 { player_count - 1 } else { seat - 1 };
    }

    hands
}

/// Reorder by fresh random sort keys
fn reshuffle<R: RngCore>(order: &mut [Card], rng: &mut R) {
    let mut keyed: Vec<(u64, Card)> = order.iter().map(|&c| (rng.next_u64(), c)).collect();
    keyed.sort_by_key(|&(key, _)| key);
    for (slot, (_, card)) in order.iter_mut().zip(keyed) {
        *slot = card;
    }
}

// ============================================================================
// CARD POOL
// ============================================================================

/// Mutable half of the pool, always touched under the lock
#[derive(Debug)]
struct Working<R> {
    order: Vec<Card>,
    rng: R,
}

/// The canonical deck plus a shuffled working copy shared by all games
#[derive(Debug)]
pub struct CardPool<R = SecureRandom> {
    deck: Vec<Card>,
    working: Mutex<Working<R>>,
}

impl CardPool<SecureRandom> {
    /// Load the deck from disk and shuffle it with the OS CSPRNG
    pub fn initialize(path: &Path, policy: MalformedTokenPolicy) -> Result<Self, DeckError> {
        Self::load(path, policy, SecureRandom::new())
    }
}

impl<R: RngCore> CardPool<R> {
    /// Pool whose first deal uses `cards` in the given order
    pub fn from_cards(cards: Vec<Card>, rng: R) -> Self {
        Self {
            working: Mutex::new(Working {
                order: cards.clone(),
                rng,
            }),
            deck: cards,
        }
    }

    /// Load the deck from disk and shuffle it once
    pub fn load(path: &Path, policy: MalformedTokenPolicy, rng: R) -> Result<Self, DeckError> {
        let pool = Self::from_cards(load_deck(path, policy)?, rng);
        pool.reshuffle();
        Ok(pool)
    }

    /// Canonical deck in load order
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Deal the whole deck to `player_count` seats, then reshuffle.
    pub fn deal_hands(&self, player_count: usize) -> Vec<VecDeque<Card>> {
        assert!(player_count > 0, "cannot deal to zero players");

        let mut working = self.working.lock().unwrap_or_else(PoisonError::into_inner);
        let Working { order, rng } = &mut *working;

        let start_seat = rng.next_index(player_count);
        let hands = distribute(order, player_count, start_seat);
        reshuffle(order, rng);

        hands
    }

    /// Reshuffle the working order without dealing
    pub fn reshuffle(&self) {
        let mut working = self.working.lock().unwrap_or_else(PoisonError::into_inner);
        let Working { order, rng } = &mut *working;
        reshuffle(order, rng);
    }

    /// Composition of the canonical deck
    pub fn stats(&self) -> DeckStats {
        DeckStats::from_cards(&self.deck)
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Summary of a deck's composition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckStats {
    pub total: usize,
    pub awards: usize,
    pub penalties: usize,
    pub zeros: usize,
    pub award_points: i64,
    pub penalty_points: i64,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl DeckStats {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut stats = DeckStats {
            total: cards.len(),
            min: cards.iter().map(|c| c.value()).min(),
            max: cards.iter().map(|c| c.value()).max(),
            ..Default::default()
        };

        for card in cards {
            match card.value() {
                0 => stats.zeros += 1,
                v if v > 0 => {
                    stats.awards += 1;
                    stats.award_points += i64::from(v);
                }
                v => {
                    stats.penalties += 1;
                    stats.penalty_points += i64::from(v);
                }
            }
        }

        stats
    }
}
