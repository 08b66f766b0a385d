//! The league service: player management, result recording and the read
//! views built on top of the rating engine and the scheduler.
//!
//! Every mutating operation reads what it needs, computes the complete
//! outcome and only then writes, so a rejected request leaves the store
//! untouched. `League` does no locking of its own; callers that share it
//! must serialize access (the server keeps it behind a mutex).

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::accuracy::accuracy_with_baseline;
use crate::clock::{Clock, SystemClock};
use crate::config::LeagueSettings;
use crate::error::{LeagueError, Result};
use crate::mode::{Mode, Ratings};
use crate::pairing::{create_schedule, visible_rounds, CurrentPairings, PairingSchedule};
use crate::player::{normalize_category, normalize_username, Player};
use crate::rating::{RatingCalculator, RatingChange};
use crate::result::{MatchResult, Outcome};
use crate::rules::RatingRules;
use crate::store::{ChangeSet, LeagueStore, ResultOp};
use crate::streak::StreakMultipliers;

/// Request to register a player.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub username: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub bio: Option<String>,
    /// Starting ratings. Defaults to the league baseline in every mode.
    #[serde(default)]
    pub ratings: Option<Ratings>,
}

/// One reported game to record.
#[derive(Debug, Clone)]
pub struct ResultSubmission {
    pub category: String,
    pub round: u32,
    pub mode: Mode,
    pub white: String,
    pub black: String,
    pub outcome: Outcome,
}

/// A row of the per-category rating leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub name: String,
    /// Rating in the requested mode.
    pub rating: i32,
    pub ratings: Ratings,
    pub recent_gain: i32,
    /// Signed pending gain (`"+4"`), shown only while the gain is fresh.
    pub display_gain: Option<String>,
}

/// A row of a category's standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub rank: usize,
    pub username: String,
    pub points: f64,
    pub rating: i32,
    pub total_rounds: u32,
    pub accuracy: String,
}

/// Chess league backed by a [`LeagueStore`].
pub struct League<S> {
    store: S,
    calculator: RatingCalculator,
    settings: LeagueSettings,
    clock: Box<dyn Clock>,
}

impl<S: LeagueStore> League<S> {
    /// Creates a league reading the system clock.
    pub fn new(store: S, rules: RatingRules, settings: LeagueSettings) -> Self {
        Self {
            store,
            calculator: RatingCalculator::new(rules),
            settings,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &LeagueSettings {
        &self.settings
    }

    // ----- players -----

    pub fn add_player(&mut self, new: NewPlayer) -> Result<Player> {
        let key = normalize_username(&new.username);
        if key.is_empty() {
            return Err(LeagueError::InvalidUsername(new.username));
        }
        if self.store.player(&key)?.is_some() {
            return Err(LeagueError::PlayerExists(new.username));
        }

        let mut player = Player::new(
            new.username,
            new.name,
            normalize_category(&new.category),
            self.settings.baseline_rating,
        );
        if let Some(ratings) = new.ratings {
            player.ratings = ratings;
        }
        player.bio = new.bio;

        self.store.save_player(&player)?;
        tracing::info!(username = %player.username, category = %player.category, "added player");
        Ok(player)
    }

    pub fn get_player(&self, username: &str) -> Result<Player> {
        self.store
            .player(&normalize_username(username))?
            .ok_or_else(|| LeagueError::PlayerNotFound(username.to_string()))
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.store.players()?)
    }

    /// Removes a player. Their recorded results stay in the log.
    pub fn delete_player(&mut self, username: &str) -> Result<()> {
        if !self.store.remove_player(&normalize_username(username))? {
            return Err(LeagueError::PlayerNotFound(username.to_string()));
        }
        tracing::info!(username, "deleted player");
        Ok(())
    }

    pub fn update_bio(&mut self, username: &str, bio: Option<String>) -> Result<Player> {
        let mut player = self.get_player(username)?;
        player.bio = bio.filter(|b| !b.trim().is_empty());
        self.store.save_player(&player)?;
        Ok(player)
    }

    pub fn set_category(&mut self, username: &str, category: &str) -> Result<Player> {
        let mut player = self.get_player(username)?;
        player.category = normalize_category(category);
        self.store.save_player(&player)?;
        tracing::info!(username = %player.username, category = %player.category, "changed category");
        Ok(player)
    }

    // ----- results -----

    /// Records one game and updates both players' aggregates.
    ///
    /// The pair must be scheduled in the given round (either colour order)
    /// and must not already have a result for that round.
    pub fn record_result(&mut self, submission: ResultSubmission) -> Result<MatchResult> {
        let ResultSubmission {
            category,
            round,
            mode,
            white,
            black,
            outcome,
        } = submission;
        let category = normalize_category(&category);

        if normalize_username(&white) == normalize_username(&black) {
            return Err(LeagueError::SelfPairing(white));
        }
        let mut player_a = self.get_player(&white)?;
        let mut player_b = self.get_player(&black)?;

        let schedule = self
            .store
            .schedule(&category)?
            .ok_or_else(|| LeagueError::CategoryNotFound(category.clone()))?;
        let scheduled = schedule
            .round(round)
            .ok_or_else(|| LeagueError::RoundNotFound {
                category: category.clone(),
                round,
            })?;
        if !scheduled.contains(&white, &black) {
            return Err(LeagueError::PairingNotFound {
                category,
                round,
                white,
                black,
            });
        }

        let history = self.store.results()?;
        if history
            .iter()
            .any(|r| r.is_pairing(&category, round, &white, &black))
        {
            return Err(LeagueError::DuplicateResult {
                category,
                round,
                player_a: white,
                player_b: black,
            });
        }

        let change = self.streak_adjusted_change(&history, &player_a, &player_b, mode, &category, outcome);
        let now = self.clock.now();
        player_a.apply_result(outcome.score_a, change.change_a, now);
        player_b.apply_result(outcome.score_b, change.change_b, now);

        let result = MatchResult {
            id: Uuid::new_v4().to_string(),
            round,
            mode,
            category,
            player_a: player_a.username.clone(),
            player_b: player_b.username.clone(),
            score_a: outcome.score_a,
            score_b: outcome.score_b,
            change_a: change.change_a,
            change_b: change.change_b,
            date: now,
        };

        self.store.commit(ChangeSet {
            players: vec![player_a, player_b],
            result: Some(ResultOp::Append(result.clone())),
        })?;

        tracing::info!(
            id = %result.id,
            category = %result.category,
            round = result.round,
            mode = %result.mode,
            player_a = %result.player_a,
            player_b = %result.player_b,
            change_a = result.change_a,
            change_b = result.change_b,
            "recorded result"
        );
        Ok(result)
    }

    /// Corrects the scores of a recorded game.
    ///
    /// The old record's effect is reversed and the deltas are recomputed from
    /// the history that preceded it. The record keeps its id, position and date.
    pub fn edit_result(&mut self, id: &str, outcome: Outcome) -> Result<MatchResult> {
        let history = self.store.results()?;
        let index = history
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LeagueError::ResultNotFound(id.to_string()))?;
        let old = &history[index];

        let mut player_a = self.get_player(&old.player_a)?;
        let mut player_b = self.get_player(&old.player_b)?;
        player_a.revert_result(old.score_a, old.change_a);
        player_b.revert_result(old.score_b, old.change_b);

        let change = self.streak_adjusted_change(
            &history[..index],
            &player_a,
            &player_b,
            old.mode,
            &old.category,
            outcome,
        );
        let now = self.clock.now();
        player_a.apply_result(outcome.score_a, change.change_a, now);
        player_b.apply_result(outcome.score_b, change.change_b, now);

        let updated = MatchResult {
            score_a: outcome.score_a,
            score_b: outcome.score_b,
            change_a: change.change_a,
            change_b: change.change_b,
            ..old.clone()
        };

        self.store.commit(ChangeSet {
            players: vec![player_a, player_b],
            result: Some(ResultOp::Replace(updated.clone())),
        })?;

        tracing::info!(
            id,
            score_a = updated.score_a,
            score_b = updated.score_b,
            change_a = updated.change_a,
            change_b = updated.change_b,
            "edited result"
        );
        Ok(updated)
    }

    /// Removes a recorded game and reverses its effect on both players.
    ///
    /// A participant who has since been deleted is skipped.
    pub fn delete_result(&mut self, id: &str) -> Result<MatchResult> {
        let removed = self
            .store
            .results()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| LeagueError::ResultNotFound(id.to_string()))?;

        let mut players = Vec::with_capacity(2);
        for (name, score, change) in [
            (&removed.player_a, removed.score_a, removed.change_a),
            (&removed.player_b, removed.score_b, removed.change_b),
        ] {
            if let Some(mut player) = self.store.player(&normalize_username(name))? {
                player.revert_result(score, change);
                players.push(player);
            }
        }

        self.store.commit(ChangeSet {
            players,
            result: Some(ResultOp::Remove(removed.id.clone())),
        })?;

        tracing::info!(id, category = %removed.category, round = removed.round, "deleted result");
        Ok(removed)
    }

    /// The result log of one category, oldest first.
    pub fn results_for(&self, category: &str) -> Result<Vec<MatchResult>> {
        let category = normalize_category(category);
        Ok(self
            .store
            .results()?
            .into_iter()
            .filter(|r| r.category == category)
            .collect())
    }

    /// Commits every player's pending gain to their `mode` rating.
    ///
    /// Returns the number of players whose rating changed.
    pub fn apply_recent_gains(&mut self, mode: Mode) -> Result<usize> {
        let players: Vec<Player> = self
            .store
            .players()?
            .into_iter()
            .filter(|p| p.recent_gain != 0)
            .map(|mut p| {
                p.promote_gain(mode);
                p
            })
            .collect();
        let promoted = players.len();

        self.store.commit(ChangeSet {
            players,
            result: None,
        })?;
        tracing::info!(%mode, promoted, "applied recent gains");
        Ok(promoted)
    }

    fn streak_adjusted_change(
        &self,
        history: &[MatchResult],
        player_a: &Player,
        player_b: &Player,
        mode: Mode,
        category: &str,
        outcome: Outcome,
    ) -> RatingChange {
        let base = self.calculator.compute_rating_change(
            player_a.rating(mode),
            player_b.rating(mode),
            outcome.score_a,
            outcome.score_b,
        );
        let streak_a = StreakMultipliers::for_player(history, &player_a.username, mode, category);
        let streak_b = StreakMultipliers::for_player(history, &player_b.username, mode, category);

        RatingChange {
            change_a: streak_a.apply(base.change_a),
            change_b: streak_b.apply(base.change_b),
        }
    }

    // ----- pairings -----

    /// Generates and stores a round-robin schedule for `category`,
    /// replacing any previous schedule for it.
    pub fn create_pairings(
        &mut self,
        category: &str,
        rounds: Option<u32>,
        interval_hours: Option<u32>,
    ) -> Result<PairingSchedule> {
        let category = normalize_category(category);
        let roster: Vec<String> = self
            .store
            .players()?
            .into_iter()
            .filter(|p| p.category == category)
            .map(|p| p.username)
            .collect();

        let interval_hours = interval_hours.unwrap_or(self.settings.default_interval_hours);
        let schedule = create_schedule(&category, &roster, rounds, interval_hours, self.clock.now())?;
        self.store.save_schedule(&schedule)?;
        Ok(schedule)
    }

    pub fn delete_pairings(&mut self, category: &str) -> Result<()> {
        let category = normalize_category(category);
        if !self.store.remove_schedule(&category)? {
            return Err(LeagueError::CategoryNotFound(category));
        }
        tracing::info!(%category, "deleted pairing schedule");
        Ok(())
    }

    pub fn schedule(&self, category: &str) -> Result<PairingSchedule> {
        let category = normalize_category(category);
        self.store
            .schedule(&category)?
            .ok_or(LeagueError::CategoryNotFound(category))
    }

    /// The rounds of `category` visible right now.
    pub fn current_pairings(&self, category: &str) -> Result<CurrentPairings> {
        let schedule = self.schedule(category)?;
        Ok(visible_rounds(&schedule.rounds, self.clock.now()))
    }

    /// Visible rounds for every category with a schedule.
    pub fn all_current_pairings(&self) -> Result<BTreeMap<String, CurrentPairings>> {
        let now = self.clock.now();
        Ok(self
            .store
            .schedules()?
            .into_iter()
            .map(|s| (s.category.clone(), visible_rounds(&s.rounds, now)))
            .collect())
    }

    // ----- views -----

    /// Players grouped by category, best `mode` rating first.
    pub fn leaderboard(&self, mode: Mode) -> Result<BTreeMap<String, Vec<LeaderboardEntry>>> {
        let now = self.clock.now();
        let window = Duration::days(self.settings.gain_display_days);
        let mut board: BTreeMap<String, Vec<LeaderboardEntry>> = BTreeMap::new();

        for player in self.store.players()? {
            if player.category.is_empty() {
                continue;
            }
            let fresh = player
                .last_gain_at
                .is_some_and(|at| now.signed_duration_since(at) < window);
            let display_gain =
                (player.recent_gain != 0 && fresh).then(|| format!("{:+}", player.recent_gain));

            board
                .entry(player.category.clone())
                .or_default()
                .push(LeaderboardEntry {
                    rating: player.rating(mode),
                    username: player.username,
                    name: player.name,
                    ratings: player.ratings,
                    recent_gain: player.recent_gain,
                    display_gain,
                });
        }

        for entries in board.values_mut() {
            entries.sort_by(|a, b| {
                b.rating
                    .cmp(&a.rating)
                    .then_with(|| normalize_username(&a.username).cmp(&normalize_username(&b.username)))
            });
        }
        Ok(board)
    }

    /// Ranked table of `category` by points, with accuracy.
    pub fn standings(&self, category: &str, mode: Mode) -> Result<Vec<StandingRow>> {
        let category = normalize_category(category);
        let mut players: Vec<Player> = self
            .store
            .players()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect();
        if players.is_empty() {
            return Err(LeagueError::CategoryNotFound(category));
        }

        players.sort_by(|a, b| {
            b.points
                .partial_cmp(&a.points)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.rating(mode).cmp(&a.rating(mode)))
                .then_with(|| a.key().cmp(&b.key()))
        });

        Ok(players
            .into_iter()
            .enumerate()
            .map(|(i, p)| StandingRow {
                rank: i + 1,
                accuracy: accuracy_with_baseline(
                    p.points,
                    p.total_rounds,
                    p.rating(mode),
                    self.settings.elite_rating,
                ),
                rating: p.rating(mode),
                points: p.points,
                total_rounds: p.total_rounds,
                username: p.username,
            })
            .collect())
    }
}
