//! League players and their cumulative aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mode::{Mode, Ratings};

/// Returns the case-insensitive key for a username.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Category names are case-sensitive but ignore surrounding whitespace.
pub fn normalize_category(category: &str) -> String {
    category.trim().to_string()
}

/// A registered league player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique handle. Compared case-insensitively, see [`normalize_username`].
    pub username: String,
    /// Display name.
    pub name: String,
    #[serde(flatten)]
    pub ratings: Ratings,
    /// Sum of per-match scores. Draws contribute halves.
    pub points: f64,
    /// Number of recorded matches.
    pub total_rounds: u32,
    /// Rating delta accrued since the last promotion.
    pub recent_gain: i32,
    /// When `recent_gain` last changed because of a recorded result.
    pub last_gain_at: Option<DateTime<Utc>>,
    /// Grouping key for pairings and leaderboards.
    pub category: String,
    pub bio: Option<String>,
}

impl Player {
    /// Creates a player with every rating at `baseline` and no history.
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        baseline: i32,
    ) -> Self {
        Self {
            username: username.into().trim().to_string(),
            name: name.into(),
            ratings: Ratings::uniform(baseline),
            points: 0.0,
            total_rounds: 0,
            recent_gain: 0,
            last_gain_at: None,
            category: category.into(),
            bio: None,
        }
    }

    /// The normalized store key for this player.
    pub fn key(&self) -> String {
        normalize_username(&self.username)
    }

    pub fn rating(&self, mode: Mode) -> i32 {
        self.ratings.get(mode)
    }

    /// Adds one match's score and rating delta to the aggregates.
    pub fn apply_result(&mut self, score: f64, change: i32, at: DateTime<Utc>) {
        self.points += score;
        self.total_rounds += 1;
        self.recent_gain += change;
        self.last_gain_at = Some(at);
    }

    /// Removes one match's score and rating delta from the aggregates.
    pub fn revert_result(&mut self, score: f64, change: i32) {
        self.points -= score;
        self.total_rounds = self.total_rounds.saturating_sub(1);
        self.recent_gain -= change;
    }

    /// Commits the pending gain to the rating for `mode`.
    ///
    /// Returns the amount promoted.
    pub fn promote_gain(&mut self, mode: Mode) -> i32 {
        let gain = self.recent_gain;
        *self.ratings.get_mut(mode) += gain;
        self.recent_gain = 0;
        gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  MagnusC "), "magnusc");
        assert_eq!(normalize_username("hikaru"), "hikaru");
    }

    #[test]
    fn test_normalize_category_keeps_case() {
        assert_eq!(normalize_category("  Open\n"), "Open");
        assert_eq!(normalize_category("u1400"), "u1400");
    }

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new(" Alice ", "Alice A.", "open", 1200);
        assert_eq!(player.username, "Alice");
        assert_eq!(player.key(), "alice");
        assert_eq!(player.ratings, Ratings::uniform(1200));
        assert_eq!(player.points, 0.0);
        assert_eq!(player.total_rounds, 0);
        assert_eq!(player.recent_gain, 0);
        assert!(player.last_gain_at.is_none());
    }

    #[test]
    fn test_apply_then_revert_restores_aggregates() {
        let mut player = Player::new("bob", "Bob", "open", 1200);
        player.apply_result(0.5, 2, at());
        player.apply_result(1.0, 3, at());
        player.revert_result(1.0, 3);

        assert_eq!(player.points, 0.5);
        assert_eq!(player.total_rounds, 1);
        assert_eq!(player.recent_gain, 2);
    }

    #[test]
    fn test_promote_gain_moves_delta_into_rating() {
        let mut player = Player::new("carol", "Carol", "open", 1200);
        player.apply_result(1.0, -4, at());

        assert_eq!(player.promote_gain(Mode::Blitz), -4);
        assert_eq!(player.rating(Mode::Blitz), 1196);
        assert_eq!(player.rating(Mode::Rapid), 1200);
        assert_eq!(player.recent_gain, 0);
    }

    #[test]
    fn test_player_json_has_flat_ratings() {
        let player = Player::new("dave", "Dave", "u1600", 1200);
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["rapid"], 1200);
        assert_eq!(json["blitz"], 1200);
        assert_eq!(json["bullet"], 1200);
    }
}
