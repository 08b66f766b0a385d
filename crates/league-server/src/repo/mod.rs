//! SQLite implementation of [`LeagueStore`].

pub mod players;
pub mod results;
pub mod schedules;

use league_core::{
    normalize_username, ChangeSet, LeagueStore, MatchResult, PairingSchedule, Player, ResultOp,
    StoreError,
};
use rusqlite::Connection;
use std::sync::MutexGuard;

use crate::db::DbPool;

fn store_error(err: rusqlite::Error) -> StoreError {
    StoreError::with_source("sqlite", err)
}

/// League storage backed by the shared SQLite connection.
#[derive(Clone)]
pub struct SqliteStore {
    db: DbPool,
}

impl SqliteStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.db
            .lock()
            .map_err(|_| StoreError::backend("database lock poisoned"))
    }
}

impl LeagueStore for SqliteStore {
    fn player(&self, key: &str) -> Result<Option<Player>, StoreError> {
        let conn = self.conn()?;
        players::get(&conn, &normalize_username(key)).map_err(store_error)
    }

    fn players(&self) -> Result<Vec<Player>, StoreError> {
        let conn = self.conn()?;
        players::list(&conn).map_err(store_error)
    }

    fn save_player(&mut self, player: &Player) -> Result<(), StoreError> {
        let conn = self.conn()?;
        players::upsert(&conn, player).map_err(store_error)
    }

    fn remove_player(&mut self, key: &str) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        players::delete(&conn, &normalize_username(key)).map_err(store_error)
    }

    fn results(&self) -> Result<Vec<MatchResult>, StoreError> {
        let conn = self.conn()?;
        results::list(&conn).map_err(store_error)
    }

    fn commit(&mut self, changes: ChangeSet) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(store_error)?;

        let found = match &changes.result {
            Some(ResultOp::Append(result)) => {
                results::insert(&tx, result).map_err(store_error)?;
                true
            }
            Some(ResultOp::Replace(result)) => results::replace(&tx, result).map_err(store_error)?,
            Some(ResultOp::Remove(id)) => results::delete(&tx, id).map_err(store_error)?,
            None => true,
        };
        if !found {
            // Dropping the transaction rolls it back.
            return Err(StoreError::backend("result to update does not exist"));
        }

        for player in &changes.players {
            players::upsert(&tx, player).map_err(store_error)?;
        }
        tx.commit().map_err(store_error)
    }

    fn schedule(&self, category: &str) -> Result<Option<PairingSchedule>, StoreError> {
        let conn = self.conn()?;
        schedules::get(&conn, category).map_err(store_error)
    }

    fn schedules(&self) -> Result<Vec<PairingSchedule>, StoreError> {
        let conn = self.conn()?;
        schedules::list(&conn).map_err(store_error)
    }

    fn save_schedule(&mut self, schedule: &PairingSchedule) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(store_error)?;
        schedules::replace(&tx, schedule).map_err(store_error)?;
        tx.commit().map_err(store_error)
    }

    fn remove_schedule(&mut self, category: &str) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        schedules::delete(&conn, category).map_err(store_error)
    }
}
