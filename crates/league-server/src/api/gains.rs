//! Gain promotion handler.

use axum::{
    extract::{Query, State},
    Json,
};
use league_core::Mode;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::parse_mode;
use super::views::ModeQuery;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GainsApplied {
    pub mode: Mode,
    pub promoted: usize,
}

/// `POST /api/gains/apply?mode=rapid`
///
/// Folds every player's pending gain into their rating for `mode` and
/// resets the gain. Usually run once per rating period.
pub async fn apply_gains(
    State(state): State<AppState>,
    Query(query): Query<ModeQuery>,
) -> Result<Json<GainsApplied>, ApiError> {
    let mode = parse_mode(query.mode.as_deref())?;
    let promoted = state.league()?.apply_recent_gains(mode)?;
    Ok(Json(GainsApplied { mode, promoted }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::state_with_players;
    use league_core::{Outcome, ResultSubmission};

    #[tokio::test]
    async fn test_apply_gains() {
        let state = state_with_players("open", &["a", "b"]);
        {
            let mut league = state.league().unwrap();
            league.create_pairings("open", None, None).unwrap();
            league
                .record_result(ResultSubmission {
                    category: "open".into(),
                    round: 1,
                    mode: Mode::Blitz,
                    white: "a".into(),
                    black: "b".into(),
                    outcome: Outcome::parse("0-1").unwrap(),
                })
                .unwrap();
        }

        let Json(applied) = apply_gains(
            State(state.clone()),
            Query(ModeQuery {
                mode: Some("blitz".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(applied.mode, Mode::Blitz);
        assert_eq!(applied.promoted, 2);

        let league = state.league().unwrap();
        let b = league.get_player("b").unwrap();
        assert_eq!(b.rating(Mode::Blitz), 1201);
        assert_eq!(b.rating(Mode::Rapid), 1200);
        assert_eq!(b.recent_gain, 0);
    }
}
