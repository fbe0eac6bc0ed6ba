//! Game constants

use crate::error::RulesError;

/// Score a player must reach to win
pub const TARGET_SCORE: u32 = 30;

/// Leader score at which penalties are preferred over awards
pub const PENALTY_THRESHOLD: u32 = 20;

/// Cards drawn into hand when a player sits down
pub const HAND_SIZE: usize = 5;

/// Default seats at the table
pub const DEFAULT_PLAYERS: usize = 4;

/// Seats are tagged 'A'..='Z'
pub const MAX_PLAYERS: usize = 26;

/// The leader policy needs at least one opponent
pub const MIN_PLAYERS: usize = 2;

/// Constants shared by every playout of a batch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub player_count: usize,
    pub target_score: u32,
    pub penalty_threshold: u32,
    pub hand_size: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYERS,
            target_score: TARGET_SCORE,
            penalty_threshold: PENALTY_THRESHOLD,
            hand_size: HAND_SIZE,
        }
    }
}

impl Rules {
    /// Default rules for the given table size
    pub fn with_players(player_count: usize) -> Self {
        Self {
            player_count,
            ..Default::default()
        }
    }

    /// Check the constants before any game is started
    pub fn validate(&self) -> Result<(), RulesError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(RulesError::PlayerCount {
                got: self.player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        if self.target_score == 0 {
            return Err(RulesError::TargetScore);
        }
        Ok(())
    }

    /// Check that a deck of `deck_len` cards can seat everyone
    pub fn validate_deck(&self, deck_len: usize) -> Result<(), RulesError> {
        if deck_len < self.player_count {
            return Err(RulesError::DeckTooSmall {
                deck: deck_len,
                players: self.player_count,
            });
        }
        Ok(())
    }
}

/// Tag for a seat: 'A' for seat 0, 'B' for seat 1, ...
pub fn seat_tag(seat: usize) -> char {
    assert!(seat < MAX_PLAYERS, "seat {} has no tag", seat);
    (b'A' + seat as u8) as char
}
