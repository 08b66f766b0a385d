//! Pairing schedules, stored as one row per schedule, round and board.

use chrono::{DateTime, Utc};
use league_core::{Pairing, PairingRound, PairingSchedule};
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};

pub fn get(conn: &Connection, category: &str) -> SqliteResult<Option<PairingSchedule>> {
    let interval_hours: Option<u32> = conn
        .query_row(
            "SELECT interval_hours FROM schedules WHERE category = ?1",
            [category],
            |row| row.get(0),
        )
        .optional()?;
    let Some(interval_hours) = interval_hours else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT round, available_at FROM pairing_rounds
         WHERE category = ?1 ORDER BY round",
    )?;
    let heads = stmt
        .query_map([category], |row| {
            Ok((row.get::<_, u32>(0)?, row.get::<_, DateTime<Utc>>(1)?))
        })?
        .collect::<SqliteResult<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT white, black FROM pairings
         WHERE category = ?1 AND round = ?2 ORDER BY board",
    )?;
    let mut rounds = Vec::with_capacity(heads.len());
    for (round, available_at) in heads {
        let pairings = stmt
            .query_map(rusqlite::params![category, round], |row| {
                Ok(Pairing {
                    white: row.get(0)?,
                    black: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        rounds.push(PairingRound {
            round,
            pairings,
            available_at,
        });
    }

    Ok(Some(PairingSchedule {
        category: category.to_string(),
        interval_hours,
        rounds,
    }))
}

/// All schedules ordered by category.
pub fn list(conn: &Connection) -> SqliteResult<Vec<PairingSchedule>> {
    let mut stmt = conn.prepare("SELECT category FROM schedules ORDER BY category")?;
    let categories = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<SqliteResult<Vec<_>>>()?;

    let mut schedules = Vec::with_capacity(categories.len());
    for category in categories {
        if let Some(schedule) = get(conn, &category)? {
            schedules.push(schedule);
        }
    }
    Ok(schedules)
}

/// Writes `schedule`, replacing any previous one for its category.
///
/// Callers should run this inside a transaction.
pub fn replace(conn: &Connection, schedule: &PairingSchedule) -> SqliteResult<()> {
    delete(conn, &schedule.category)?;
    conn.execute(
        "INSERT INTO schedules (category, interval_hours) VALUES (?1, ?2)",
        rusqlite::params![schedule.category, schedule.interval_hours],
    )?;

    let mut insert_round = conn.prepare(
        "INSERT INTO pairing_rounds (category, round, available_at) VALUES (?1, ?2, ?3)",
    )?;
    let mut insert_pairing = conn.prepare(
        "INSERT INTO pairings (category, round, board, white, black)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for round in &schedule.rounds {
        insert_round.execute(rusqlite::params![
            schedule.category,
            round.round,
            round.available_at
        ])?;
        for (board, pairing) in round.pairings.iter().enumerate() {
            insert_pairing.execute(rusqlite::params![
                schedule.category,
                round.round,
                board as i64,
                pairing.white,
                pairing.black
            ])?;
        }
    }
    Ok(())
}

/// Removes a schedule with its rounds and pairings.
pub fn delete(conn: &Connection, category: &str) -> SqliteResult<bool> {
    Ok(conn.execute("DELETE FROM schedules WHERE category = ?1", [category])? > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use chrono::{Duration, TimeZone};
    use league_core::create_schedule;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_replace_and_get() {
        let db = init_db(":memory:").unwrap();
        let conn = db.lock().unwrap();
        let schedule =
            create_schedule("open", &roster(&["a", "b", "c", "d", "e"]), None, 12, start()).unwrap();

        replace(&conn, &schedule).unwrap();
        let loaded = get(&conn, "open").unwrap().unwrap();
        assert_eq!(loaded, schedule);
        assert_eq!(loaded.rounds[1].available_at, start() + Duration::hours(12));
    }

    #[test]
    fn test_replace_overwrites_same_category() {
        let db = init_db(":memory:").unwrap();
        let conn = db.lock().unwrap();
        let players = roster(&["a", "b", "c", "d"]);
        replace(&conn, &create_schedule("open", &players, None, 24, start()).unwrap()).unwrap();
        replace(&conn, &create_schedule("u1400", &players, None, 24, start()).unwrap()).unwrap();

        let shorter = create_schedule("open", &players, Some(1), 48, start()).unwrap();
        replace(&conn, &shorter).unwrap();

        assert_eq!(get(&conn, "open").unwrap().unwrap(), shorter);
        assert_eq!(get(&conn, "u1400").unwrap().unwrap().rounds.len(), 3);
        let categories: Vec<String> = list(&conn).unwrap().into_iter().map(|s| s.category).collect();
        assert_eq!(categories, vec!["open", "u1400"]);
    }

    #[test]
    fn test_delete() {
        let db = init_db(":memory:").unwrap();
        let conn = db.lock().unwrap();
        let schedule = create_schedule("open", &roster(&["a", "b"]), None, 24, start()).unwrap();
        replace(&conn, &schedule).unwrap();

        assert!(delete(&conn, "open").unwrap());
        assert!(!delete(&conn, "open").unwrap());
        assert!(get(&conn, "open").unwrap().is_none());
    }
}
