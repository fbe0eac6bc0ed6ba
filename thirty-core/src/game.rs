//! Game state and the turn loop

use std::collections::VecDeque;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::CardPool;
use crate::player::{Decision, Player};
use crate::random::{SecureRandom, UniformRandomSource};
use crate::rules::{seat_tag, Rules, MAX_PLAYERS, MIN_PLAYERS};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Winner tag written for drawn games
pub const DRAW_TAG: char = '*';

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winner(char),
    Draw,
}

/// Game status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(Outcome),
}

/// Everything about a game that is not owned by a player
#[derive(Clone, Copy, Debug)]
pub struct GameState {
    /// Seat whose turn is next (may equal the player count until normalized)
    pub active_seat: usize,
    /// Turns played so far
    pub turn: u32,
    pub status: GameStatus,
}

/// Outcome of one playout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub turns: u32,
    pub outcome: Outcome,
}

impl ResultRecord {
    pub fn is_draw(&self) -> bool {
        self.outcome == Outcome::Draw
    }

    /// Winning tag (None for draw)
    pub fn winner(&self) -> Option<char> {
        match self.outcome {
            Outcome::Winner(tag) => Some(tag),
            Outcome::Draw => None,
        }
    }

    /// Winning tag, or [`DRAW_TAG`] for a draw
    pub fn winner_tag(&self) -> char {
        self.winner().unwrap_or(DRAW_TAG)
    }
}

// ============================================================================
// GAME ENGINE
// ============================================================================

/// One playout: players, rules and the source of randomness for turns
pub struct GameEngine<R = SecureRandom> {
    players: Vec<Player>,
    rules: Rules,
    state: GameState,
    rng: R,
}

impl<R: RngCore> GameEngine<R> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Deal from the pool and pick a random starting seat
    pub fn new<P: RngCore>(pool: &CardPool<P>, rules: Rules, mut rng: R) -> Self {
        check_player_count(rules.player_count);
        let hands = pool.deal_hands(rules.player_count);
        let starting_seat = rng.next_index(rules.player_count);
        Self::from_hands(hands, rules, starting_seat, rng)
    }

    /// Start from explicit per-seat queues
    pub fn from_hands(hands: Vec<VecDeque<Card>>, rules: Rules, starting_seat: usize, rng: R) -> Self {
        check_player_count(hands.len());
        assert!(starting_seat < hands.len(), "starting seat {} out of range", starting_seat);

        let player_count = hands.len();
        let players = hands
            .into_iter()
            .enumerate()
            .map(|(seat, queued)| Player::new(seat_tag(seat), queued, rules.hand_size))
            .collect();

        Self {
            players,
            rules: Rules {
                player_count,
                ..rules
            },
            state: GameState {
                active_seat: starting_seat,
                turn: 0,
                status: GameStatus::InProgress,
            },
            rng,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current score of every seat, in seat order
    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(Player::score).collect()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state.status, GameStatus::Finished(_))
    }

    // ========================================================================
    // TURN LOOP
    // ========================================================================

    /// Play until the game ends
    pub fn simulate(mut self) -> ResultRecord {
        loop {
            if let Some(record) = self.step() {
                return record;
            }
        }
    }

    /// Play one turn. Returns the result once the game is over.
    pub fn step(&mut self) -> Option<ResultRecord> {
        if let GameStatus::Finished(outcome) = self.state.status {
            return Some(self.record(outcome));
        }

        self.state.turn += 1;
        if self.state.active_seat == self.players.len() {
            self.state.active_seat = 0;
        }

        let seat = self.state.active_seat;
        let scores = self.scores();
        let decision = self.players[seat].turn(seat, &scores, &self.rules, &mut self.rng);

        tracing::trace!(
            "Turn {}: {} {:?}",
            self.state.turn,
            self.players[seat].tag(),
            decision
        );

        self.apply(seat, decision);

        match self.check_outcome() {
            Some(outcome) => {
                self.state.status = GameStatus::Finished(outcome);
                Some(self.record(outcome))
            }
            None => {
                self.state.active_seat += 1;
                None
            }
        }
    }

    fn apply(&mut self, seat: usize, decision: Decision) {
        match decision {
            Decision::Award { points } => self.players[seat].award(points),
            Decision::Penalize { target, points } => {
                assert!(target < self.players.len(), "penalty targets missing seat {}", target);
                self.players[target].penalize(points);
            }
            Decision::Skip | Decision::Discard => {}
        }
    }

    /// A winner beats a simultaneous draw
    fn check_outcome(&self) -> Option<Outcome> {
        if let Some(winner) = self
            .players
            .iter()
            .find(|p| p.score() >= self.rules.target_score)
        {
            return Some(Outcome::Winner(winner.tag()));
        }

        if self.players.iter().all(Player::is_exhausted) {
            return Some(Outcome::Draw);
        }

        None
    }

    fn record(&self, outcome: Outcome) -> ResultRecord {
        ResultRecord {
            turns: self.state.turn,
            outcome,
        }
    }
}

fn check_player_count(count: usize) {
    assert!(
        (MIN_PLAYERS..=MAX_PLAYERS).contains(&count),
        "unsupported player count {}",
        count
    );
}
