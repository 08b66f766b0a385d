//! Player API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use league_core::{accuracy, Mode, NewPlayer, Player, Ratings};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::AppState;

/// Shown on profiles of players who have not written a bio.
pub const DEFAULT_BIO: &str = "This player’s profile will be updated soon.";

/// Public profile of one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub username: String,
    pub name: String,
    pub category: String,
    #[serde(flatten)]
    pub ratings: Ratings,
    pub points: f64,
    pub total_rounds: u32,
    pub recent_gain: i32,
    /// Accuracy estimate against the rapid rating.
    pub accuracy: String,
    pub bio: String,
}

impl From<Player> for PlayerProfile {
    fn from(player: Player) -> Self {
        Self {
            accuracy: accuracy(player.points, player.total_rounds, player.rating(Mode::Rapid)),
            bio: player.bio.unwrap_or_else(|| DEFAULT_BIO.to_string()),
            username: player.username,
            name: player.name,
            category: player.category,
            ratings: player.ratings,
            points: player.points,
            total_rounds: player.total_rounds,
            recent_gain: player.recent_gain,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BioUpdate {
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryUpdate {
    pub category: String,
}

/// `GET /api/players`: every player ordered by username.
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    Ok(Json(state.league()?.list_players()?))
}

/// `POST /api/players`
///
/// - `201 Created`: the new player
/// - `400 Bad Request`: blank or already taken username
pub async fn create_player(
    State(state): State<AppState>,
    Json(new): Json<NewPlayer>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player = state.league()?.add_player(new)?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// `GET /api/players/:username`
pub async fn get_player(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PlayerProfile>, ApiError> {
    let player = state.league()?.get_player(&username)?;
    Ok(Json(player.into()))
}

/// `DELETE /api/players/:username`
pub async fn delete_player(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.league()?.delete_player(&username)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/players/:username/bio`. An empty bio clears it.
pub async fn update_bio(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(update): Json<BioUpdate>,
) -> Result<Json<Player>, ApiError> {
    Ok(Json(state.league()?.update_bio(&username, update.bio)?))
}

/// `PUT /api/players/:username/category`
pub async fn set_category(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<Player>, ApiError> {
    Ok(Json(state.league()?.set_category(&username, &update.category)?))
}
