//! Player rows.

use league_core::{Player, Ratings};
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult, Row};

const COLUMNS: &str = "username, name, rapid, blitz, bullet, points, total_rounds,
    recent_gain, last_gain_at, category, bio";

fn map_row(row: &Row<'_>) -> SqliteResult<Player> {
    Ok(Player {
        username: row.get(0)?,
        name: row.get(1)?,
        ratings: Ratings {
            rapid: row.get(2)?,
            blitz: row.get(3)?,
            bullet: row.get(4)?,
        },
        points: row.get(5)?,
        total_rounds: row.get(6)?,
        recent_gain: row.get(7)?,
        last_gain_at: row.get(8)?,
        category: row.get(9)?,
        bio: row.get(10)?,
    })
}

pub fn get(conn: &Connection, key: &str) -> SqliteResult<Option<Player>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM players WHERE key = ?1"),
        [key],
        map_row,
    )
    .optional()
}

/// All players ordered by key.
pub fn list(conn: &Connection) -> SqliteResult<Vec<Player>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM players ORDER BY key"))?;
    let players = stmt.query_map([], map_row)?.collect();
    players
}

/// Inserts or overwrites the row for `player.key()`.
pub fn upsert(conn: &Connection, player: &Player) -> SqliteResult<()> {
    conn.execute(
        "INSERT INTO players (key, username, name, rapid, blitz, bullet, points,
            total_rounds, recent_gain, last_gain_at, category, bio)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(key) DO UPDATE SET
            username = excluded.username,
            name = excluded.name,
            rapid = excluded.rapid,
            blitz = excluded.blitz,
            bullet = excluded.bullet,
            points = excluded.points,
            total_rounds = excluded.total_rounds,
            recent_gain = excluded.recent_gain,
            last_gain_at = excluded.last_gain_at,
            category = excluded.category,
            bio = excluded.bio",
        rusqlite::params![
            player.key(),
            player.username,
            player.name,
            player.ratings.rapid,
            player.ratings.blitz,
            player.ratings.bullet,
            player.points,
            player.total_rounds,
            player.recent_gain,
            player.last_gain_at,
            player.category,
            player.bio,
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, key: &str) -> SqliteResult<bool> {
    Ok(conn.execute("DELETE FROM players WHERE key = ?1", [key])? > 0)
}
