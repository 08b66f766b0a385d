//! Leaderboard and standings handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use league_core::{LeaderboardEntry, StandingRow};
use serde::Deserialize;
use std::collections::BTreeMap;

use super::error::ApiError;
use super::parse_mode;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    pub mode: Option<String>,
}

/// `GET /api/leaderboard?mode=blitz`: players by category, best rating first.
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<ModeQuery>,
) -> Result<Json<BTreeMap<String, Vec<LeaderboardEntry>>>, ApiError> {
    let mode = parse_mode(query.mode.as_deref())?;
    Ok(Json(state.league()?.leaderboard(mode)?))
}

/// `GET /api/standings/:category?mode=rapid`: ranked table with accuracy.
pub async fn standings(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<ModeQuery>,
) -> Result<Json<Vec<StandingRow>>, ApiError> {
    let mode = parse_mode(query.mode.as_deref())?;
    Ok(Json(state.league()?.standings(&category, mode)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::state_with_players;
    use axum::http::StatusCode;
    use league_core::{Mode, Outcome, ResultSubmission};

    fn query(mode: Option<&str>) -> Query<ModeQuery> {
        Query(ModeQuery {
            mode: mode.map(str::to_string),
        })
    }

    fn played_state() -> crate::AppState {
        let state = state_with_players("open", &["a", "b"]);
        {
            let mut league = state.league().unwrap();
            league.create_pairings("open", None, None).unwrap();
            league
                .record_result(ResultSubmission {
                    category: "open".into(),
                    round: 1,
                    mode: Mode::Rapid,
                    white: "a".into(),
                    black: "b".into(),
                    outcome: Outcome::parse("1-0").unwrap(),
                })
                .unwrap();
            league.apply_recent_gains(Mode::Rapid).unwrap();
        }
        state
    }

    #[tokio::test]
    async fn test_leaderboard_by_mode() {
        let state = played_state();

        let Json(board) = leaderboard(State(state.clone()), query(None)).await.unwrap();
        let open = &board["open"];
        assert_eq!(open[0].username, "a");
        assert_eq!(open[0].rating, 1201);
        assert_eq!(open[1].rating, 1198);

        let Json(board) = leaderboard(State(state), query(Some("blitz"))).await.unwrap();
        assert!(board["open"].iter().all(|e| e.rating == 1200));
    }

    #[tokio::test]
    async fn test_leaderboard_rejects_unknown_mode() {
        let state = played_state();
        let err = leaderboard(State(state), query(Some("classical")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_standings() {
        let state = played_state();
        let Json(table) = standings(State(state.clone()), Path("open".into()), query(None))
            .await
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!((table[0].rank, table[0].username.as_str()), (1, "a"));
        assert_eq!(table[0].points, 1.0);
        // 1.0 * 1201 / 2300 * 100
        assert_eq!(table[0].accuracy, "52.2%");
        assert_eq!(table[1].accuracy, "0.0%");

        let err = standings(State(state), Path("u1400".into()), query(None))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
