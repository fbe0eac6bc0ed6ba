//! Players and the turn policy

use std::collections::VecDeque;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Hand};
use crate::random::UniformRandomSource;
use crate::rules::Rules;

/// What the active player does this turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Add `points` to the acting player's score
    Award { points: u32 },
    /// Apply `points` (zero or negative) to the player at seat `target`
    Penalize { target: usize, points: i32 },
    /// Nothing left to play
    Skip,
    /// Throw a card away. The policy never chooses this.
    Discard,
}

/// One seat at the table
#[derive(Clone, Debug)]
pub struct Player {
    tag: char,
    score: u32,
    hand: Hand,
}

impl Player {
    /// Sit down with a dealt queue and draw the opening hand
    pub fn new(tag: char, queued: VecDeque<Card>, hand_size: usize) -> Self {
        let mut hand = Hand::new(queued);
        hand.draw_many(hand_size);
        Self { tag, score: 0, hand }
    }

    pub fn tag(&self) -> char {
        self.tag
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn has_cards_left(&self) -> bool {
        self.hand.has_cards_left()
    }

    /// No cards in hand or queue
    pub fn is_exhausted(&self) -> bool {
        self.hand.is_exhausted()
    }

    /// Add points, saturating at `u32::MAX`
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Apply a non-positive card value, clamping the score at zero
    pub fn penalize(&mut self, points: i32) {
        debug_assert!(points <= 0, "penalty of {} points", points);
        self.score = self.score.saturating_sub(points.unsigned_abs());
    }

    /// Choose this turn's action, play the card and draw a replacement.
    ///
    /// Priority: skip when empty-handed, an award that lands exactly on the
    /// target, a penalty on the leader once they reach the penalty
    /// threshold, the largest award, and finally any penalty on the leader.
    pub fn turn<R: RngCore + ?Sized>(
        &mut self,
        self_index: usize,
        scores: &[u32],
        rules: &Rules,
        rng: &mut R,
    ) -> Decision {
        let decision = self.decide(self_index, scores, rules, rng);

        let played = match decision {
            Decision::Award { points } => Some(Card(points as i32)),
            Decision::Penalize { points, .. } => Some(Card(points)),
            Decision::Skip | Decision::Discard => None,
        };
        if let Some(card) = played {
            let held = self.hand.play(card);
            debug_assert!(held, "played card {} not in hand", card);
        }
        self.hand.draw();

        decision
    }

    fn decide<R: RngCore + ?Sized>(
        &self,
        self_index: usize,
        scores: &[u32],
        rules: &Rules,
        rng: &mut R,
    ) -> Decision {
        if !self.hand.has_cards_left() {
            return Decision::Skip;
        }

        let leader = find_leader(self_index, scores, rng);

        let needed = i64::from(rules.target_score) - i64::from(self.score);
        if let Some(card) = self.hand.exact_award(needed) {
            return Decision::Award { points: card.magnitude() };
        }

        let mildest = self.hand.mildest_penalty();
        if let Some(card) = mildest {
            if scores[leader] >= rules.penalty_threshold {
                return Decision::Penalize { target: leader, points: card.value() };
            }
        }

        if let Some(card) = self.hand.largest_award() {
            return Decision::Award { points: card.magnitude() };
        }

        match mildest {
            Some(card) => Decision::Penalize { target: leader, points: card.value() },
            None => Decision::Skip,
        }
    }
}

/// Highest-scoring seat other than `self_index`, ties broken uniformly.
pub fn find_leader<R: RngCore + ?Sized>(self_index: usize, scores: &[u32], rng: &mut R) -> usize {
    assert!(scores.len() >= 2, "leader needs at least one opponent");

    let best = scores
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != self_index)
        .map(|(_, &s)| s)
        .max()
        .unwrap_or_default();

    let tied: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|&(i, &s)| i != self_index && s == best)
        .map(|(i, _)| i)
        .collect();

    if tied.len() == 1 {
        tied[0]
    } else {
        tied[rng.next_index(tied.len())]
    }
}
