//! Server configuration loaded from `league.toml`.

use league_core::{ConfigError, LeagueSettings, RatingRules};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level server configuration.
///
/// Every field has a default, so a missing or empty file is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on. Defaults to 3000.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path to the SQLite database file.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Requests slower than this are logged as warnings.
    #[serde(default = "default_slow_request_ms")]
    pub slow_request_ms: u64,
    #[serde(default)]
    pub league: LeagueSettings,
    /// Rating rule table. Defaults to the standard league table.
    #[serde(default)]
    pub rules: RatingRules,
}

fn default_port() -> u16 {
    3000
}

fn default_database() -> PathBuf {
    PathBuf::from("data/league.db")
}

fn default_slow_request_ms() -> u64 {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database: default_database(),
            slow_request_ms: default_slow_request_ms(),
            league: LeagueSettings::default(),
            rules: RatingRules::default(),
        }
    }
}

impl ServerConfig {
    /// Default location, `league.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("league.toml")
    }

    /// Loads the configuration at `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] for invalid TOML and
    /// [`ConfigError::InvalidRules`] if the `[rules]` table is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.rules.validate()?;
        Ok(config)
    }
}
