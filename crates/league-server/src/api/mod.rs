//! API handlers for the league server.

pub mod error;
pub mod gains;
pub mod pairings;
pub mod players;
pub mod results;
pub mod views;

use league_core::Mode;

use error::ApiError;

/// Parses an optional `?mode=` query value, defaulting to rapid.
fn parse_mode(mode: Option<&str>) -> Result<Mode, ApiError> {
    match mode {
        None | Some("") => Ok(Mode::Rapid),
        Some(raw) => raw.parse().map_err(ApiError::BadRequest),
    }
}
