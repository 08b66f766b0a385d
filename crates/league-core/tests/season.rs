//! End-to-end season over the in-memory store.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use league_core::{
    FixedClock, League, LeagueError, LeagueSettings, MemoryStore, Mode, NewPlayer,
    Outcome, RatingRules, ResultSubmission,
};

fn season_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 19, 0, 0).unwrap()
}

fn setup(names: &[&str]) -> (League<MemoryStore>, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(season_start()));
    let mut league = League::new(
        MemoryStore::new(),
        RatingRules::default(),
        LeagueSettings::default(),
    )
    .with_clock(clock.clone());

    for name in names {
        league
            .add_player(NewPlayer {
                username: name.to_string(),
                name: name.to_string(),
                category: "open".to_string(),
                bio: None,
                ratings: None,
            })
            .unwrap();
    }
    (league, clock)
}

fn white_wins(round: u32, white: &str, black: &str) -> ResultSubmission {
    ResultSubmission {
        category: "open".to_string(),
        round,
        mode: Mode::Rapid,
        white: white.to_string(),
        black: black.to_string(),
        outcome: Outcome::parse("1-0").unwrap(),
    }
}

#[test]
fn test_full_round_robin_season() {
    let (mut league, clock) = setup(&["ana", "ben", "cai", "dan"]);
    let schedule = league.create_pairings("open", None, Some(24)).unwrap();
    assert_eq!(schedule.rounds.len(), 3);

    for round in &schedule.rounds {
        let current = league.current_pairings("open").unwrap();
        assert_eq!(current.visible_rounds.len() as u32, round.round);

        for pairing in &round.pairings {
            league
                .record_result(white_wins(round.round, &pairing.white, &pairing.black))
                .unwrap();
        }
        clock.advance(Duration::hours(24));
    }

    let current = league.current_pairings("open").unwrap();
    assert_eq!(current.visible_rounds.len(), 3);
    assert_eq!(current.next_round_at, None);

    // ana holds seat 0 and has white every round.
    let table = league.standings("open", Mode::Rapid).unwrap();
    let order: Vec<&str> = table.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(order, vec!["ana", "ben", "cai", "dan"]);
    assert_eq!(table[0].points, 3.0);
    assert_eq!(table.iter().map(|r| r.points).sum::<f64>(), 6.0);
    assert!(table.iter().all(|r| r.total_rounds == 3));

    assert_eq!(league.get_player("ana").unwrap().recent_gain, 3);
    assert_eq!(league.results_for("open").unwrap().len(), 6);

    assert_eq!(league.apply_recent_gains(Mode::Rapid).unwrap(), 4);
    let board = league.leaderboard(Mode::Rapid).unwrap();
    assert_eq!(board["open"][0].username, "ana");
    assert_eq!(board["open"][0].rating, 1203);
}

#[test]
fn test_rejected_results_leave_no_trace() {
    let (mut league, _clock) = setup(&["ana", "ben"]);
    league.create_pairings("open", Some(2), Some(24)).unwrap();
    league.record_result(white_wins(1, "ana", "ben")).unwrap();

    let before = league.list_players().unwrap();
    let err = league.record_result(white_wins(1, "ben", "ana")).unwrap_err();
    assert!(matches!(err, LeagueError::DuplicateResult { .. }));
    let err = league.record_result(white_wins(3, "ana", "ben")).unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(league.list_players().unwrap(), before);
    assert_eq!(league.results_for("open").unwrap().len(), 1);
}

#[test]
fn test_edit_then_delete_restores_fresh_players() {
    let (mut league, _clock) = setup(&["ana", "ben"]);
    league.create_pairings("open", Some(3), Some(24)).unwrap();
    let first = league.record_result(white_wins(1, "ana", "ben")).unwrap();
    let second = league.record_result(white_wins(2, "ben", "ana")).unwrap();

    league
        .edit_result(&first.id, Outcome::parse("½-½").unwrap())
        .unwrap();
    league.delete_result(&second.id).unwrap();
    league.delete_result(&first.id).unwrap();

    for name in ["ana", "ben"] {
        let player = league.get_player(name).unwrap();
        assert_eq!(player.points, 0.0);
        assert_eq!(player.total_rounds, 0);
        assert_eq!(player.recent_gain, 0);
    }
    assert!(league.results_for("open").unwrap().is_empty());
}

#[test]
fn test_custom_rule_table() {
    let rules = RatingRules::from_toml_str(
        r#"
        [[buckets]]
        min = 0
        win = 10
        loss = -10
        draw = 0
        "#,
    )
    .unwrap();
    let mut league = League::new(MemoryStore::new(), rules, LeagueSettings::default());
    for name in ["ana", "ben"] {
        league
            .add_player(NewPlayer {
                username: name.to_string(),
                name: name.to_string(),
                category: "open".to_string(),
                bio: None,
                ratings: None,
            })
            .unwrap();
    }
    league.create_pairings("open", None, None).unwrap();

    let result = league.record_result(white_wins(1, "ana", "ben")).unwrap();
    assert_eq!((result.change_a, result.change_b), (10, -10));
}
