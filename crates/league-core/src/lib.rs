//! Core of the chess league.
//!
//! This crate provides everything the league needs apart from transport:
//! - [`RatingRules`] and [`RatingCalculator`] for bucketed rating deltas
//! - streak detection and [`StreakMultipliers`]
//! - [`create_schedule`] and [`visible_rounds`] for round-robin pairings
//! - [`League`], the service tying players, results and schedules together
//!   over a [`LeagueStore`]

pub mod accuracy;
mod clock;
mod config;
mod error;
mod league;
mod mode;
mod pairing;
mod player;
mod rating;
mod result;
mod rules;
mod store;
pub mod streak;

pub use accuracy::accuracy;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, LeagueSettings};
pub use error::{LeagueError, Result};
pub use league::{LeaderboardEntry, League, NewPlayer, ResultSubmission, StandingRow};
pub use mode::{Mode, Ratings};
pub use pairing::{
    create_schedule, visible_rounds, CurrentPairings, Pairing, PairingRound, PairingSchedule,
};
pub use player::{normalize_username, Player};
pub use rating::{RatingCalculator, RatingChange};
pub use result::{MatchResult, Outcome, Verdict};
pub use rules::{Adjustment, Bucket, RatingRules, SideDelta};
pub use store::{ChangeSet, LeagueStore, MemoryStore, ResultOp, StoreError};
pub use streak::StreakMultipliers;
