//! Result submission and correction handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use league_core::{LeagueError, MatchResult, Mode, Outcome, ResultSubmission};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::AppState;

/// One reported game, e.g. `{"white": "alice", "black": "bob", "result": "1-0"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    pub white: String,
    pub black: String,
    pub result: String,
}

/// Games of one round of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBatch {
    pub category: String,
    pub round: u32,
    /// Defaults to rapid.
    #[serde(default)]
    pub mode: Option<Mode>,
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedResult {
    pub white: String,
    pub black: String,
    pub error: String,
}

/// What happened to each entry of a [`ResultBatch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub recorded: Vec<MatchResult>,
    pub rejected: Vec<RejectedResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub result: String,
}

/// `GET /api/results/:category`: the category's results, oldest first.
pub async fn list_results(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<MatchResult>>, ApiError> {
    Ok(Json(state.league()?.results_for(&category)?))
}

/// `POST /api/results`
///
/// Entries are recorded in order, each on its own. An entry that fails
/// (unknown player, pair not scheduled, already recorded) is listed under
/// `rejected` and does not stop the rest.
///
/// - `200 OK`: a [`BatchReport`]
/// - `400 Bad Request`: an unparseable score anywhere in the batch, or no entries
/// - `404 Not Found`: the category has no schedule or the round does not exist
pub async fn submit_results(
    State(state): State<AppState>,
    Json(batch): Json<ResultBatch>,
) -> Result<Json<BatchReport>, ApiError> {
    if batch.results.is_empty() {
        return Err(ApiError::BadRequest("no results submitted".to_string()));
    }
    let outcomes = batch
        .results
        .iter()
        .map(|entry| Outcome::parse(&entry.result))
        .collect::<Result<Vec<_>, _>>()?;

    let mut league = state.league()?;
    let schedule = league.schedule(&batch.category)?;
    if schedule.round(batch.round).is_none() {
        return Err(LeagueError::RoundNotFound {
            category: batch.category,
            round: batch.round,
        }
        .into());
    }

    let mode = batch.mode.unwrap_or(Mode::Rapid);
    let mut report = BatchReport {
        recorded: Vec::new(),
        rejected: Vec::new(),
    };
    for (entry, outcome) in batch.results.into_iter().zip(outcomes) {
        let submission = ResultSubmission {
            category: batch.category.clone(),
            round: batch.round,
            mode,
            white: entry.white.clone(),
            black: entry.black.clone(),
            outcome,
        };
        match league.record_result(submission) {
            Ok(result) => report.recorded.push(result),
            Err(LeagueError::Store(err)) => return Err(LeagueError::Store(err).into()),
            Err(err) => {
                tracing::warn!(white = %entry.white, black = %entry.black, error = %err, "rejected result");
                report.rejected.push(RejectedResult {
                    white: entry.white,
                    black: entry.black,
                    error: err.to_string(),
                });
            }
        }
    }
    Ok(Json(report))
}

/// `PUT /api/results/id/:id`: replaces the scores of a recorded game.
pub async fn edit_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ScoreUpdate>,
) -> Result<Json<MatchResult>, ApiError> {
    let outcome = Outcome::parse(&update.result)?;
    Ok(Json(state.league()?.edit_result(&id, outcome)?))
}

/// `DELETE /api/results/id/:id`: returns the removed record.
pub async fn delete_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MatchResult>, ApiError> {
    Ok(Json(state.league()?.delete_result(&id)?))
}
