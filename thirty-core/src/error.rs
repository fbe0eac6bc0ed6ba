//! Error types for deck loading and rule validation

use std::path::PathBuf;

/// Failure to load the canonical deck
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to read deck file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("deck contains no cards")]
    Empty,
}

/// Rule constants that cannot produce a playable game
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("player count must be between {min} and {max}, got {got}")]
    PlayerCount { got: usize, min: usize, max: usize },

    #[error("target score must be positive")]
    TargetScore,

    #[error("deck of {deck} cards cannot give {players} players a card each")]
    DeckTooSmall { deck: usize, players: usize },
}
