//! Mapping of league errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use league_core::LeagueError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    League(#[from] LeagueError),
    #[error("{0}")]
    BadRequest(String),
    #[error("league state is unavailable")]
    Poisoned,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::League(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::League(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::League(_) | ApiError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
