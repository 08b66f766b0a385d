//! Chess league server library.
//!
//! An axum HTTP API over [`league_core::League`], persisted in SQLite. The
//! binary in `main.rs` loads configuration and serves [`app`].

pub mod api;
pub mod config;
pub mod db;
pub mod middleware;
pub mod repo;

use axum::routing::{get, post, put};
use axum::Router;
use league_core::League;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use api::error::ApiError;
use middleware::SlowRequestThreshold;
use repo::SqliteStore;

/// Application state shared across all handlers.
///
/// Every request locks the league for the whole of its read-modify-write
/// cycle, so concurrent submissions are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    league: Arc<Mutex<League<SqliteStore>>>,
}

impl AppState {
    pub fn new(league: League<SqliteStore>) -> Self {
        Self {
            league: Arc::new(Mutex::new(league)),
        }
    }

    pub fn league(&self) -> Result<MutexGuard<'_, League<SqliteStore>>, ApiError> {
        self.league.lock().map_err(|_| ApiError::Poisoned)
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Builds the full router.
pub fn app(state: AppState, slow_request: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/leaderboard", get(api::views::leaderboard))
        .route("/api/standings/:category", get(api::views::standings))
        .route(
            "/api/players",
            get(api::players::list_players).post(api::players::create_player),
        )
        .route(
            "/api/players/:username",
            get(api::players::get_player).delete(api::players::delete_player),
        )
        .route("/api/players/:username/bio", put(api::players::update_bio))
        .route(
            "/api/players/:username/category",
            put(api::players::set_category),
        )
        .route("/api/pairings", post(api::pairings::create_pairings))
        .route("/api/pairings/current", get(api::pairings::all_current_pairings))
        .route(
            "/api/pairings/:category",
            get(api::pairings::current_pairings).delete(api::pairings::delete_pairings),
        )
        .route("/api/results", post(api::results::submit_results))
        .route("/api/results/:category", get(api::results::list_results))
        .route(
            "/api/results/id/:id",
            put(api::results::edit_result).delete(api::results::delete_result),
        )
        .route("/api/gains/apply", post(api::gains::apply_gains))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            SlowRequestThreshold(slow_request),
            middleware::timing_layer,
        ))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_returns_ok() {
        assert_eq!(health().await, "ok");
    }
}
