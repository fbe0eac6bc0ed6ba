//! Cards and per-player hands

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// ============================================================================
// CARD
// ============================================================================

/// A signed card value.
///
/// Positive cards award their value to the holder, the rest are penalty
/// cards played against the leader. Zero only appears when a malformed deck
/// token was coerced, and sorts with the penalties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card(pub i32);

impl Card {
    pub fn value(self) -> i32 {
        self.0
    }

    /// Points added to the holder's score when awarded
    pub fn is_award(self) -> bool {
        self.0 > 0
    }

    pub fn magnitude(self) -> u32 {
        self.0.unsigned_abs()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

// ============================================================================
// HAND
// ============================================================================

/// One player's cards, split by where they currently sit.
///
/// Cards move queued -> awards/penalties -> played and are never created or
/// dropped, so [`Hand::total_cards`] is constant for a game.
#[derive(Clone, Debug, Default)]
pub struct Hand {
    queued: VecDeque<Card>,
    awards: Vec<Card>,
    penalties: Vec<Card>,
    played: Vec<Card>,
}

impl Hand {
    /// Hand with every card still queued
    pub fn new(queued: VecDeque<Card>) -> Self {
        Self {
            queued,
            ..Default::default()
        }
    }

    /// Move the next queued card into the matching partition
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.queued.pop_front()?;
        if card.is_award() {
            self.awards.push(card);
        } else {
            self.penalties.push(card);
        }
        Some(card)
    }

    /// Draw up to `count` cards, stopping early when the queue runs dry
    pub fn draw_many(&mut self, count: usize) -> usize {
        (0..count).take_while(|_| self.draw().is_some()).count()
    }

    /// Award or penalty cards are in hand (queued cards do not count)
    pub fn has_cards_left(&self) -> bool {
        !self.awards.is_empty() || !self.penalties.is_empty()
    }

    /// Nothing left to play or draw
    pub fn is_exhausted(&self) -> bool {
        !self.has_cards_left() && self.queued.is_empty()
    }

    /// Cards not yet played
    pub fn live_cards(&self) -> usize {
        self.queued.len() + self.awards.len() + self.penalties.len()
    }

    /// Every card dealt to this hand, played or not
    pub fn total_cards(&self) -> usize {
        self.live_cards() + self.played.len()
    }

    pub fn queued(&self) -> &VecDeque<Card> {
        &self.queued
    }

    pub fn awards(&self) -> &[Card] {
        &self.awards
    }

    pub fn penalties(&self) -> &[Card] {
        &self.penalties
    }

    pub fn played(&self) -> &[Card] {
        &self.played
    }

    /// Award card whose value is exactly `needed`
    pub fn exact_award(&self, needed: i64) -> Option<Card> {
        self.awards
            .iter()
            .copied()
            .find(|c| i64::from(c.value()) == needed)
    }

    /// Highest award card
    pub fn largest_award(&self) -> Option<Card> {
        self.awards.iter().copied().max()
    }

    /// Penalty card closest to zero
    pub fn mildest_penalty(&self) -> Option<Card> {
        self.penalties.iter().copied().max()
    }

    /// Move a held card to the played pile. Returns false if it is not held.
    pub fn play(&mut self, card: Card) -> bool {
        let partition = if card.is_award() {
            &mut self.awards
        } else {
            &mut self.penalties
        };
        match partition.iter().position(|&c| c == card) {
            Some(idx) => {
                partition.swap_remove(idx);
                self.played.push(card);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(values: &[i32]) -> Hand {
        Hand::new(values.iter().map(|&v| Card(v)).collect())
    }

    #[test]
    fn test_draw_routes_by_sign() {
        let mut h = hand(&[3, -2, 0, 7]);
        assert_eq!(h.draw_many(4), 4);
        assert_eq!(h.awards(), &[Card(3), Card(7)]);
        assert_eq!(h.penalties(), &[Card(-2), Card(0)]);
        assert!(h.queued().is_empty());
    }

    #[test]
    fn test_draw_many_stops_at_empty_queue() {
        let mut h = hand(&[1, 2]);
        assert_eq!(h.draw_many(5), 2);
        assert_eq!(h.draw(), None);
    }

    #[test]
    fn test_queued_cards_do_not_count_as_left() {
        let h = hand(&[1, 2]);
        assert!(!h.has_cards_left());
        assert!(!h.is_exhausted());
        assert!(hand(&[]).is_exhausted());
    }

    #[test]
    fn test_selection_helpers() {
        let mut h = hand(&[4, 9, -1, -6, 2]);
        h.draw_many(5);
        assert_eq!(h.largest_award(), Some(Card(9)));
        assert_eq!(h.mildest_penalty(), Some(Card(-1)));
        assert_eq!(h.exact_award(2), Some(Card(2)));
        assert_eq!(h.exact_award(5), None);
    }

    #[test]
    fn test_play_keeps_total() {
        let mut h = hand(&[4, -3, 5]);
        h.draw_many(3);
        let total = h.total_cards();
        assert!(h.play(Card(-3)));
        assert!(!h.play(Card(-3)));
        assert_eq!(h.played(), &[Card(-3)]);
        assert_eq!(h.total_cards(), total);
        assert_eq!(h.live_cards(), total - 1);
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card(5).to_string(), "+5");
        assert_eq!(Card(-4).to_string(), "-4");
        assert_eq!(Card(-4).magnitude(), 4);
    }
}
