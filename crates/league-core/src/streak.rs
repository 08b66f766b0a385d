//! Win and loss streaks over the result log, and the multipliers they earn.
//!
//! Streaks are scoped to one `(mode, category)` pair and counted from the
//! most recent result backwards. A draw breaks both streaks.

use crate::mode::Mode;
use crate::result::{MatchResult, Verdict};

/// Counts consecutive most-recent results for `username` with the given verdict.
fn streak(
    history: &[MatchResult],
    username: &str,
    mode: Mode,
    category: &str,
    wanted: Verdict,
) -> u32 {
    history
        .iter()
        .rev()
        .filter(|r| r.mode == mode && r.category == category)
        .filter_map(|r| r.verdict_for(username))
        .take_while(|verdict| *verdict == wanted)
        .count() as u32
}

/// Consecutive wins for `username`, most recent first.
pub fn win_streak(history: &[MatchResult], username: &str, mode: Mode, category: &str) -> u32 {
    streak(history, username, mode, category, Verdict::Win)
}

/// Consecutive losses for `username`, most recent first.
pub fn loss_streak(history: &[MatchResult], username: &str, mode: Mode, category: &str) -> u32 {
    streak(history, username, mode, category, Verdict::Loss)
}

/// Bonus applied to gains while on a win streak.
pub fn win_multiplier(win_streak: u32) -> i32 {
    match win_streak {
        s if s >= 6 => 5,
        s if s >= 3 => 3,
        _ => 1,
    }
}

/// Multiplier earned by a loss streak.
pub fn loss_multiplier(loss_streak: u32) -> i32 {
    match loss_streak {
        s if s >= 6 => 3,
        s if s >= 3 => 2,
        _ => 1,
    }
}

/// Both multipliers for one player going into a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakMultipliers {
    pub win: i32,
    pub loss: i32,
}

impl StreakMultipliers {
    /// Scans `history` for `username`'s current streaks.
    pub fn for_player(history: &[MatchResult], username: &str, mode: Mode, category: &str) -> Self {
        Self {
            win: win_multiplier(win_streak(history, username, mode, category)),
            loss: loss_multiplier(loss_streak(history, username, mode, category)),
        }
    }

    /// Scales a base rating change.
    ///
    /// A gain is multiplied by both multipliers; a loss only by the loss
    /// multiplier.
    pub fn apply(self, base: i32) -> i32 {
        let factor = if base > 0 { self.win * self.loss } else { self.loss };
        (f64::from(base) * f64::from(factor)).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn result(a: &str, b: &str, score_a: f64, score_b: f64) -> MatchResult {
        result_in(a, b, score_a, score_b, Mode::Rapid, "open")
    }

    fn result_in(
        a: &str,
        b: &str,
        score_a: f64,
        score_b: f64,
        mode: Mode,
        category: &str,
    ) -> MatchResult {
        MatchResult {
            id: format!("{a}-{b}"),
            round: 1,
            mode,
            category: category.to_string(),
            player_a: a.to_string(),
            player_b: b.to_string(),
            score_a,
            score_b,
            change_a: 0,
            change_b: 0,
            date: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_history_has_no_streak() {
        assert_eq!(win_streak(&[], "alice", Mode::Rapid, "open"), 0);
        assert_eq!(loss_streak(&[], "alice", Mode::Rapid, "open"), 0);
    }

    #[test]
    fn test_win_streak_counts_both_colours() {
        let history = vec![
            result("bob", "alice", 1.0, 0.0),
            result("alice", "carol", 1.0, 0.0),
            result("dave", "alice", 0.0, 2.0),
            result("alice", "erin", 1.5, 0.5),
        ];
        assert_eq!(win_streak(&history, "alice", Mode::Rapid, "open"), 3);
        assert_eq!(loss_streak(&history, "alice", Mode::Rapid, "open"), 0);
    }

    #[test]
    fn test_draw_breaks_both_streaks() {
        let history = vec![
            result("alice", "bob", 1.0, 0.0),
            result("alice", "carol", 1.0, 0.0),
            result("alice", "dave", 0.5, 0.5),
        ];
        assert_eq!(win_streak(&history, "alice", Mode::Rapid, "open"), 0);
        assert_eq!(loss_streak(&history, "alice", Mode::Rapid, "open"), 0);
    }

    #[test]
    fn test_streak_ignores_other_modes_categories_and_players() {
        let history = vec![
            result("alice", "bob", 0.0, 1.0),
            result("alice", "carol", 0.0, 1.0),
            result_in("alice", "dave", 1.0, 0.0, Mode::Blitz, "open"),
            result_in("alice", "dave", 1.0, 0.0, Mode::Rapid, "u1600"),
            result("bob", "carol", 1.0, 0.0),
        ];
        assert_eq!(loss_streak(&history, "alice", Mode::Rapid, "open"), 2);
        assert_eq!(win_streak(&history, "alice", Mode::Blitz, "open"), 1);
        assert_eq!(win_streak(&history, "alice", Mode::Rapid, "u1600"), 1);
    }

    #[test]
    fn test_streak_matches_username_case_insensitively() {
        let history = vec![result("Alice", "bob", 1.0, 0.0)];
        assert_eq!(win_streak(&history, "ALICE", Mode::Rapid, "open"), 1);
    }

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(win_multiplier(0), 1);
        assert_eq!(win_multiplier(2), 1);
        assert_eq!(win_multiplier(3), 3);
        assert_eq!(win_multiplier(5), 3);
        assert_eq!(win_multiplier(6), 5);
        assert_eq!(win_multiplier(20), 5);

        assert_eq!(loss_multiplier(2), 1);
        assert_eq!(loss_multiplier(3), 2);
        assert_eq!(loss_multiplier(6), 3);
    }

    #[test]
    fn test_six_wins_quintuple_next_gain() {
        let history: Vec<_> = (0..6)
            .map(|i| result("alice", &format!("p{i}"), 1.0, 0.0))
            .collect();
        assert_eq!(win_streak(&history, "alice", Mode::Rapid, "open"), 6);

        let multipliers = StreakMultipliers::for_player(&history, "alice", Mode::Rapid, "open");
        assert_eq!(multipliers, StreakMultipliers { win: 5, loss: 1 });
        assert_eq!(multipliers.apply(2), 10);
        assert_eq!(multipliers.apply(-3), -3);
    }

    #[test]
    fn test_loss_streak_scales_gain_and_loss() {
        let history: Vec<_> = (0..3)
            .map(|i| result(&format!("p{i}"), "bob", 1.0, 0.0))
            .collect();
        let multipliers = StreakMultipliers::for_player(&history, "bob", Mode::Rapid, "open");
        assert_eq!(multipliers, StreakMultipliers { win: 1, loss: 2 });
        assert_eq!(multipliers.apply(3), 6);
        assert_eq!(multipliers.apply(-2), -4);
        assert_eq!(multipliers.apply(0), 0);
    }
}
