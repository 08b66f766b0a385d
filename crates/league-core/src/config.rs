//! League tuning knobs and configuration errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration or a rule table.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The rating rule table is not contiguous and exhaustive.
    #[error("Invalid rating rules: {0}")]
    InvalidRules(String),
}

/// League-wide settings that are not part of the rating rule table.
///
/// Every field has a default so an empty `[league]` section is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    /// Rating assigned to every mode of a new player. Defaults to 1200.
    #[serde(default = "default_baseline_rating")]
    pub baseline_rating: i32,
    /// Hours between round unlocks when a request does not specify one.
    #[serde(default = "default_interval_hours")]
    pub default_interval_hours: u32,
    /// How long a recent gain stays visible on the leaderboard.
    #[serde(default = "default_gain_display_days")]
    pub gain_display_days: i64,
    /// Rating treated as 100% in the accuracy estimate.
    #[serde(default = "default_elite_rating")]
    pub elite_rating: f64,
}

fn default_baseline_rating() -> i32 {
    1200
}

fn default_interval_hours() -> u32 {
    24
}

fn default_gain_display_days() -> i64 {
    7
}

fn default_elite_rating() -> f64 {
    crate::accuracy::ELITE_RATING
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            baseline_rating: default_baseline_rating(),
            default_interval_hours: default_interval_hours(),
            gain_display_days: default_gain_display_days(),
            elite_rating: default_elite_rating(),
        }
    }
}
