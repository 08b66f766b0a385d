//! Persistence seam for players, the result log and pairing schedules.
//!
//! [`League`](crate::League) reads and writes through [`LeagueStore`]. The
//! crate ships [`MemoryStore`]; durable backends live with the caller.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::pairing::PairingSchedule;
use crate::player::{normalize_username, Player};
use crate::result::MatchResult;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure reported by a store backend.
#[derive(Debug, Error)]
#[error("storage error: {message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// A change to the result log, committed together with player updates.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultOp {
    Append(MatchResult),
    /// Overwrites the record with the same id in place.
    Replace(MatchResult),
    Remove(String),
}

/// Everything one league operation writes.
///
/// Backends must apply a change set atomically: either every player update
/// and the log change land, or none do.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet {
    pub players: Vec<Player>,
    pub result: Option<ResultOp>,
}

/// Storage used by [`League`](crate::League).
///
/// Player keys are normalized usernames. `results` must return records in
/// insertion order; streaks depend on it.
pub trait LeagueStore {
    fn player(&self, key: &str) -> Result<Option<Player>, StoreError>;
    /// All players ordered by key.
    fn players(&self) -> Result<Vec<Player>, StoreError>;
    /// Inserts or overwrites the player stored under `player.key()`.
    fn save_player(&mut self, player: &Player) -> Result<(), StoreError>;
    fn remove_player(&mut self, key: &str) -> Result<bool, StoreError>;

    fn results(&self) -> Result<Vec<MatchResult>, StoreError>;
    fn commit(&mut self, changes: ChangeSet) -> Result<(), StoreError>;

    fn schedule(&self, category: &str) -> Result<Option<PairingSchedule>, StoreError>;
    /// All schedules ordered by category.
    fn schedules(&self) -> Result<Vec<PairingSchedule>, StoreError>;
    /// Replaces any existing schedule for the same category.
    fn save_schedule(&mut self, schedule: &PairingSchedule) -> Result<(), StoreError>;
    fn remove_schedule(&mut self, category: &str) -> Result<bool, StoreError>;
}

/// In-process store backed by ordinary collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    players: BTreeMap<String, Player>,
    results: Vec<MatchResult>,
    schedules: BTreeMap<String, PairingSchedule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeagueStore for MemoryStore {
    fn player(&self, key: &str) -> Result<Option<Player>, StoreError> {
        Ok(self.players.get(&normalize_username(key)).cloned())
    }

    fn players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.values().cloned().collect())
    }

    fn save_player(&mut self, player: &Player) -> Result<(), StoreError> {
        self.players.insert(player.key(), player.clone());
        Ok(())
    }

    fn remove_player(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.players.remove(&normalize_username(key)).is_some())
    }

    fn results(&self) -> Result<Vec<MatchResult>, StoreError> {
        Ok(self.results.clone())
    }

    fn commit(&mut self, changes: ChangeSet) -> Result<(), StoreError> {
        // The log change is the only fallible step, so it goes first.
        match changes.result {
            Some(ResultOp::Append(result)) => self.results.push(result),
            Some(ResultOp::Replace(result)) => {
                let index = self.position(&result.id)?;
                self.results[index] = result;
            }
            Some(ResultOp::Remove(id)) => {
                let index = self.position(&id)?;
                self.results.remove(index);
            }
            None => {}
        }

        for player in changes.players {
            self.players.insert(player.key(), player);
        }
        Ok(())
    }

    fn schedule(&self, category: &str) -> Result<Option<PairingSchedule>, StoreError> {
        Ok(self.schedules.get(category).cloned())
    }

    fn schedules(&self) -> Result<Vec<PairingSchedule>, StoreError> {
        Ok(self.schedules.values().cloned().collect())
    }

    fn save_schedule(&mut self, schedule: &PairingSchedule) -> Result<(), StoreError> {
        self.schedules
            .insert(schedule.category.clone(), schedule.clone());
        Ok(())
    }

    fn remove_schedule(&mut self, category: &str) -> Result<bool, StoreError> {
        Ok(self.schedules.remove(category).is_some())
    }
}

impl MemoryStore {
    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.results
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::backend(format!("no result with id {id}")))
    }
}
