//! Match outcomes and the recorded result log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::LeagueError;
use crate::mode::Mode;
use crate::player::normalize_username;

/// The two scores of a single match, from player A's and player B's side.
///
/// Scores are ordinal: only which side scored more matters to the rating
/// engine, so `1-0`, `2-0` and `1.5-0.5` are all wins for A.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub score_a: f64,
    pub score_b: f64,
}

impl Outcome {
    /// Creates an outcome, rejecting negative or non-finite scores.
    pub fn new(score_a: f64, score_b: f64) -> Result<Self, LeagueError> {
        for score in [score_a, score_b] {
            if !score.is_finite() || score < 0.0 {
                return Err(LeagueError::InvalidScore(format!("{score_a}-{score_b}")));
            }
        }
        Ok(Self { score_a, score_b })
    }

    /// Parses an admin result string such as `"1-0"`, `"0.5-0.5"`, `"½-½"` or `"2-0"`.
    pub fn parse(s: &str) -> Result<Self, LeagueError> {
        let invalid = || LeagueError::InvalidScore(s.to_string());
        let (a, b) = s.trim().split_once('-').ok_or_else(invalid)?;
        let score_a = parse_score(a).ok_or_else(invalid)?;
        let score_b = parse_score(b).ok_or_else(invalid)?;
        Self::new(score_a, score_b).map_err(|_| invalid())
    }

    /// Compares A's score against B's.
    pub fn ordering(&self) -> Ordering {
        self.score_a
            .partial_cmp(&self.score_b)
            .unwrap_or(Ordering::Equal)
    }
}

fn parse_score(s: &str) -> Option<f64> {
    match s.trim() {
        "½" | "1/2" => Some(0.5),
        "" => None,
        other => other.parse().ok(),
    }
}

/// How a recorded match ended for one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Win,
    Loss,
    Draw,
}

/// One recorded match in the result log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub round: u32,
    pub mode: Mode,
    pub category: String,
    pub player_a: String,
    pub player_b: String,
    pub score_a: f64,
    pub score_b: f64,
    pub change_a: i32,
    pub change_b: i32,
    pub date: DateTime<Utc>,
}

impl MatchResult {
    /// The match result from `username`'s perspective, or `None` if they did not play.
    pub fn verdict_for(&self, username: &str) -> Option<Verdict> {
        let key = normalize_username(username);
        let (own, opponent) = if normalize_username(&self.player_a) == key {
            (self.score_a, self.score_b)
        } else if normalize_username(&self.player_b) == key {
            (self.score_b, self.score_a)
        } else {
            return None;
        };

        Some(if own > opponent {
            Verdict::Win
        } else if own < opponent {
            Verdict::Loss
        } else {
            Verdict::Draw
        })
    }

    /// Returns true if this record is the game between `a` and `b`, in either
    /// colour order, for the given category and round.
    pub fn is_pairing(&self, category: &str, round: u32, a: &str, b: &str) -> bool {
        if self.category != category || self.round != round {
            return false;
        }
        let (a, b) = (normalize_username(a), normalize_username(b));
        let (pa, pb) = (
            normalize_username(&self.player_a),
            normalize_username(&self.player_b),
        );
        (pa == a && pb == b) || (pa == b && pb == a)
    }
}
