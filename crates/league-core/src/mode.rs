//! Time-control modes and the per-mode rating map.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time control a game was played under. Each mode carries its own rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Rapid,
    Blitz,
    Bullet,
}

impl Mode {
    /// All modes in display order.
    pub const ALL: [Mode; 3] = [Mode::Rapid, Mode::Blitz, Mode::Bullet];

    /// Returns the lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Rapid => "rapid",
            Mode::Blitz => "blitz",
            Mode::Bullet => "bullet",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rapid" => Ok(Mode::Rapid),
            "blitz" => Ok(Mode::Blitz),
            "bullet" => Ok(Mode::Bullet),
            other => Err(format!("unknown mode '{other}'")),
        }
    }
}

/// A player's rating in every mode.
///
/// All three values are always present so a result can be recorded in any
/// mode without a lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub rapid: i32,
    pub blitz: i32,
    pub bullet: i32,
}

impl Ratings {
    /// Every mode at the same starting value.
    pub const fn uniform(rating: i32) -> Self {
        Self {
            rapid: rating,
            blitz: rating,
            bullet: rating,
        }
    }

    pub fn get(&self, mode: Mode) -> i32 {
        match mode {
            Mode::Rapid => self.rapid,
            Mode::Blitz => self.blitz,
            Mode::Bullet => self.bullet,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut i32 {
        match mode {
            Mode::Rapid => &mut self.rapid,
            Mode::Blitz => &mut self.blitz,
            Mode::Bullet => &mut self.bullet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode_case_insensitive() {
        assert_eq!("Rapid".parse::<Mode>(), Ok(Mode::Rapid));
        assert_eq!(" blitz ".parse::<Mode>(), Ok(Mode::Blitz));
        assert_eq!("BULLET".parse::<Mode>(), Ok(Mode::Bullet));
        assert!("classical".parse::<Mode>().is_err());
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Blitz).unwrap(), "\"blitz\"");
        let mode: Mode = serde_json::from_str("\"bullet\"").unwrap();
        assert_eq!(mode, Mode::Bullet);
    }

    #[test]
    fn ratings_get_and_get_mut() {
        let mut ratings = Ratings::uniform(1200);
        *ratings.get_mut(Mode::Blitz) += 15;
        assert_eq!(ratings.get(Mode::Rapid), 1200);
        assert_eq!(ratings.get(Mode::Blitz), 1215);
        assert_eq!(ratings.get(Mode::Bullet), 1200);
    }
}
