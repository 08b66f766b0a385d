//! Error types for league operations.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by [`League`](crate::League) operations.
///
/// Variants fall into three groups: validation failures (the request is
/// malformed or not legitimate), not-found failures (an unknown key), and
/// storage failures. Every variant means nothing was written.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("invalid score: {0}")]
    InvalidScore(String),

    #[error("invalid round count: {0}")]
    InvalidRounds(u32),

    #[error("invalid round interval: {0} hours")]
    InvalidInterval(u32),

    #[error("not enough players to create pairings in category '{category}' (found {found})")]
    NotEnoughPlayers { category: String, found: usize },

    #[error("no pairing {white} vs {black} in round {round} of category '{category}'")]
    PairingNotFound {
        category: String,
        round: u32,
        white: String,
        black: String,
    },

    #[error("result for {player_a} vs {player_b} in round {round} of category '{category}' already recorded")]
    DuplicateResult {
        category: String,
        round: u32,
        player_a: String,
        player_b: String,
    },

    #[error("invalid username: '{0}'")]
    InvalidUsername(String),

    #[error("username already exists: {0}")]
    PlayerExists(String),

    #[error("a player cannot be paired against themselves: {0}")]
    SelfPairing(String),

    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("round {round} not found in category '{category}'")]
    RoundNotFound { category: String, round: u32 },

    #[error("result not found: {0}")]
    ResultNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LeagueError {
    /// Returns true for unknown usernames, categories, rounds and results.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PlayerNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::RoundNotFound { .. }
                | Self::ResultNotFound(_)
        )
    }

    /// Returns true for rejected requests that a caller could correct.
    pub fn is_validation(&self) -> bool {
        !self.is_not_found() && !matches!(self, Self::Store(_))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LeagueError>;
