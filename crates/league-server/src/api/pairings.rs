//! Pairing schedule handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use league_core::{CurrentPairings, PairingRound, PairingSchedule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingRequest {
    pub category: String,
    /// Defaults to one full round-robin cycle.
    #[serde(default)]
    pub rounds: Option<u32>,
    /// Defaults to the configured interval.
    #[serde(default)]
    pub interval_hours: Option<u32>,
}

/// Public view of one category's pairings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingsView {
    pub category: String,
    pub interval_hours: u32,
    pub visible_rounds: Vec<PairingRound>,
    pub next_round_at: Option<DateTime<Utc>>,
}

/// `POST /api/pairings`: generates a schedule, replacing the category's old one.
///
/// - `201 Created`: the full schedule
/// - `400 Bad Request`: fewer than two players, a round count of zero or
///   above the ceiling, or an interval that overflows the calendar
pub async fn create_pairings(
    State(state): State<AppState>,
    Json(request): Json<PairingRequest>,
) -> Result<(StatusCode, Json<PairingSchedule>), ApiError> {
    let schedule = state.league()?.create_pairings(
        &request.category,
        request.rounds,
        request.interval_hours,
    )?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// `GET /api/pairings/current`: visible rounds of every category.
pub async fn all_current_pairings(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, CurrentPairings>>, ApiError> {
    Ok(Json(state.league()?.all_current_pairings()?))
}

/// `GET /api/pairings/:category`
pub async fn current_pairings(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<PairingsView>, ApiError> {
    let league = state.league()?;
    let interval_hours = league.schedule(&category)?.interval_hours;
    let current = league.current_pairings(&category)?;
    Ok(Json(PairingsView {
        category,
        interval_hours,
        visible_rounds: current.visible_rounds,
        next_round_at: current.next_round_at,
    }))
}

/// `DELETE /api/pairings/:category`
pub async fn delete_pairings(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.league()?.delete_pairings(&category)?;
    Ok(StatusCode::NO_CONTENT)
}
