//! SQLite connection and schema.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Shared database connection.
pub type DbPool = Arc<Mutex<Connection>>;

/// Opens the database at `path` and creates the schema if needed.
///
/// Tables:
/// - `players`: one row per player, keyed by normalized username
/// - `results`: the result log; `seq` preserves insertion order
/// - `schedules`, `pairing_rounds`, `pairings`: one schedule per category
///
/// Use `:memory:` for an in-memory database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or schema creation fails.
pub fn init_db<P: AsRef<Path>>(path: P) -> SqliteResult<DbPool> {
    let conn = Connection::open(path)?;

    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS players (
            key TEXT PRIMARY KEY,
            username TEXT NOT NULL,
            name TEXT NOT NULL,
            rapid INTEGER NOT NULL,
            blitz INTEGER NOT NULL,
            bullet INTEGER NOT NULL,
            points REAL NOT NULL DEFAULT 0,
            total_rounds INTEGER NOT NULL DEFAULT 0,
            recent_gain INTEGER NOT NULL DEFAULT 0,
            last_gain_at TEXT,
            category TEXT NOT NULL,
            bio TEXT
        );

        CREATE TABLE IF NOT EXISTS results (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            round INTEGER NOT NULL,
            mode TEXT NOT NULL,
            category TEXT NOT NULL,
            player_a TEXT NOT NULL,
            player_b TEXT NOT NULL,
            score_a REAL NOT NULL,
            score_b REAL NOT NULL,
            change_a INTEGER NOT NULL,
            change_b INTEGER NOT NULL,
            date TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schedules (
            category TEXT PRIMARY KEY,
            interval_hours INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS pairing_rounds (
            category TEXT NOT NULL REFERENCES schedules(category) ON DELETE CASCADE,
            round INTEGER NOT NULL,
            available_at TEXT NOT NULL,
            PRIMARY KEY (category, round)
        );

        CREATE TABLE IF NOT EXISTS pairings (
            category TEXT NOT NULL,
            round INTEGER NOT NULL,
            board INTEGER NOT NULL,
            white TEXT NOT NULL,
            black TEXT NOT NULL,
            PRIMARY KEY (category, round, board),
            FOREIGN KEY (category, round)
                REFERENCES pairing_rounds(category, round) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_results_category ON results(category);
        CREATE INDEX IF NOT EXISTS idx_players_category ON players(category);
        ",
    )?;

    Ok(Arc::new(Mutex::new(conn)))
}
