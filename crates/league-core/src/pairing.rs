//! Round-robin pairing schedules and their release-time visibility.
//!
//! Schedules are produced with the circle method: seat 0 stays fixed and
//! every other seat moves one place each round, so any two players meet at
//! most once in `n - 1` rounds. An odd roster gets an extra bye seat; the
//! player drawn against it sits the round out.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};
use crate::player::normalize_username;

/// One game within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub white: String,
    pub black: String,
}

impl Pairing {
    /// Returns true if this is the game between `a` and `b` in either colour order.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let (a, b) = (normalize_username(a), normalize_username(b));
        let (white, black) = (normalize_username(&self.white), normalize_username(&self.black));
        (white == a && black == b) || (white == b && black == a)
    }
}

/// All games of one round and when they unlock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRound {
    /// 1-based round number.
    pub round: u32,
    pub pairings: Vec<Pairing>,
    pub available_at: DateTime<Utc>,
}

impl PairingRound {
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairings.iter().any(|p| p.matches(a, b))
    }
}

/// The full schedule for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSchedule {
    pub category: String,
    /// Hours between consecutive round unlocks.
    pub interval_hours: u32,
    pub rounds: Vec<PairingRound>,
}

impl PairingSchedule {
    pub fn round(&self, round: u32) -> Option<&PairingRound> {
        self.rounds.iter().find(|r| r.round == round)
    }
}

/// Upper bound on an explicit round count, unless one full cycle is longer.
pub const MAX_ROUNDS: u32 = 500;

/// Generates a round-robin schedule for `roster`.
///
/// `rounds` defaults to a single full cycle (`n - 1` rounds, counting the
/// bye seat). Asking for more rounds than that repeats pairings. Round `k`
/// (0-based) unlocks at `now + k * interval_hours`.
///
/// # Errors
///
/// Returns [`LeagueError::NotEnoughPlayers`] for rosters smaller than two,
/// [`LeagueError::InvalidRounds`] if `rounds` is zero or above the ceiling
/// and [`LeagueError::InvalidInterval`] if the last unlock time is out of
/// range.
pub fn create_schedule(
    category: &str,
    roster: &[String],
    rounds: Option<u32>,
    interval_hours: u32,
    now: DateTime<Utc>,
) -> Result<PairingSchedule> {
    if roster.len() < 2 {
        return Err(LeagueError::NotEnoughPlayers {
            category: category.to_string(),
            found: roster.len(),
        });
    }

    let mut seats: Vec<Option<&str>> = roster.iter().map(|name| Some(name.as_str())).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }
    let n = seats.len();

    let full_cycle = u32::try_from(n - 1).unwrap_or(u32::MAX);
    let total_rounds = match rounds {
        Some(r) if r == 0 || r > MAX_ROUNDS.max(full_cycle) => {
            return Err(LeagueError::InvalidRounds(r))
        }
        Some(r) => r,
        None => full_cycle,
    };

    let mut schedule = Vec::new();
    for index in 0..total_rounds {
        let available_at = unlock_time(now, index, interval_hours)
            .ok_or(LeagueError::InvalidInterval(interval_hours))?;
        let pairings = (0..n / 2)
            .filter_map(|i| match (seats[i], seats[n - 1 - i]) {
                (Some(white), Some(black)) => Some(Pairing {
                    white: white.to_string(),
                    black: black.to_string(),
                }),
                _ => None,
            })
            .collect();

        schedule.push(PairingRound {
            round: index + 1,
            pairings,
            available_at,
        });

        seats[1..].rotate_right(1);
    }

    tracing::info!(
        category,
        players = roster.len(),
        rounds = total_rounds,
        interval_hours,
        "generated pairing schedule"
    );

    Ok(PairingSchedule {
        category: category.to_string(),
        interval_hours,
        rounds: schedule,
    })
}

fn unlock_time(now: DateTime<Utc>, index: u32, interval_hours: u32) -> Option<DateTime<Utc>> {
    let hours = i64::from(index).checked_mul(i64::from(interval_hours))?;
    now.checked_add_signed(Duration::try_hours(hours)?)
}

/// The rounds of a schedule a visitor may see right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPairings {
    pub visible_rounds: Vec<PairingRound>,
    /// Unlock time of the first round that has not unlocked yet.
    pub next_round_at: Option<DateTime<Utc>>,
}

/// Filters `rounds` to those unlocked at `now`.
///
/// If nothing has unlocked yet the first round is shown anyway, and its
/// unlock time becomes `next_round_at`.
pub fn visible_rounds(rounds: &[PairingRound], now: DateTime<Utc>) -> CurrentPairings {
    let mut current = CurrentPairings::default();

    for round in rounds {
        if round.available_at <= now {
            current.visible_rounds.push(round.clone());
        } else if current.visible_rounds.is_empty() {
            current.visible_rounds.push(round.clone());
            current.next_round_at = Some(round.available_at);
        } else if current.next_round_at.is_none() {
            current.next_round_at = Some(round.available_at);
        }
    }

    current
}
