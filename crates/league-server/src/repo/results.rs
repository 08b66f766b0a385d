//! The result log.

use league_core::{MatchResult, Mode};
use rusqlite::types::Type;
use rusqlite::{Connection, Result as SqliteResult, Row};

fn map_row(row: &Row<'_>) -> SqliteResult<MatchResult> {
    let mode: String = row.get(2)?;
    let mode = mode
        .parse::<Mode>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?;

    Ok(MatchResult {
        id: row.get(0)?,
        round: row.get(1)?,
        mode,
        category: row.get(3)?,
        player_a: row.get(4)?,
        player_b: row.get(5)?,
        score_a: row.get(6)?,
        score_b: row.get(7)?,
        change_a: row.get(8)?,
        change_b: row.get(9)?,
        date: row.get(10)?,
    })
}

/// Every result in insertion order.
pub fn list(conn: &Connection) -> SqliteResult<Vec<MatchResult>> {
    let mut stmt = conn.prepare(
        "SELECT id, round, mode, category, player_a, player_b,
                score_a, score_b, change_a, change_b, date
         FROM results ORDER BY seq",
    )?;
    let results = stmt.query_map([], map_row)?.collect();
    results
}

pub fn insert(conn: &Connection, result: &MatchResult) -> SqliteResult<()> {
    conn.execute(
        "INSERT INTO results (id, round, mode, category, player_a, player_b,
            score_a, score_b, change_a, change_b, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            result.id,
            result.round,
            result.mode.as_str(),
            result.category,
            result.player_a,
            result.player_b,
            result.score_a,
            result.score_b,
            result.change_a,
            result.change_b,
            result.date,
        ],
    )?;
    Ok(())
}

/// Overwrites the row with `result.id`, keeping its position. Returns false
/// if no such row exists.
pub fn replace(conn: &Connection, result: &MatchResult) -> SqliteResult<bool> {
    let changed = conn.execute(
        "UPDATE results SET round = ?2, mode = ?3, category = ?4, player_a = ?5,
            player_b = ?6, score_a = ?7, score_b = ?8, change_a = ?9,
            change_b = ?10, date = ?11
         WHERE id = ?1",
        rusqlite::params![
            result.id,
            result.round,
            result.mode.as_str(),
            result.category,
            result.player_a,
            result.player_b,
            result.score_a,
            result.score_b,
            result.change_a,
            result.change_b,
            result.date,
        ],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, id: &str) -> SqliteResult<bool> {
    Ok(conn.execute("DELETE FROM results WHERE id = ?1", [id])? > 0)
}
