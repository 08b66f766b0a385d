//! The rating rule table.
//!
//! A table is an ordered list of [`Bucket`]s keyed by the absolute rating
//! difference between two players, plus an [`Adjustment`] record that takes
//! over whenever the two ratings differ. The table is loaded once and
//! handed to a [`RatingCalculator`](crate::RatingCalculator); nothing
//! mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ConfigError;

/// Rating deltas for one inclusive range of rating differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Smallest difference covered.
    pub min: u32,
    /// Largest difference covered. `None` means unbounded.
    #[serde(default)]
    pub max: Option<u32>,
    pub win: i32,
    pub loss: i32,
    pub draw: i32,
}

impl Bucket {
    pub const fn new(min: u32, max: Option<u32>, win: i32, loss: i32, draw: i32) -> Self {
        Self {
            min,
            max,
            win,
            loss,
            draw,
        }
    }

    pub fn contains(&self, diff: u32) -> bool {
        diff >= self.min && self.max.map_or(true, |max| diff <= max)
    }
}

/// Deltas for the stronger and the weaker side of an unequal pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideDelta {
    pub strong: i32,
    pub weak: i32,
}

/// Fixed figures used when one player is strictly higher rated.
///
/// `stronger_win` and `stronger_loss` replace the bucket figures;
/// `stronger_draw` is added on top of the bucket's draw figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub stronger_win: SideDelta,
    pub stronger_loss: SideDelta,
    pub stronger_draw: SideDelta,
}

impl Default for Adjustment {
    fn default() -> Self {
        Self {
            stronger_win: SideDelta { strong: 1, weak: -2 },
            stronger_loss: SideDelta { strong: -3, weak: 3 },
            stronger_draw: SideDelta { strong: -1, weak: 1 },
        }
    }
}

/// Ordered bucket table plus the adjustment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRules {
    #[serde(default = "default_buckets")]
    pub buckets: Vec<Bucket>,
    #[serde(default)]
    pub adjustment: Adjustment,
}

fn default_buckets() -> Vec<Bucket> {
    vec![
        Bucket::new(0, Some(10), 1, -2, 0),
        Bucket::new(11, Some(30), 2, -3, 1),
        Bucket::new(31, Some(100), 3, -4, 2),
        Bucket::new(101, Some(200), 4, -5, 3),
        Bucket::new(201, None, 5, -6, 4),
    ]
}

impl Default for RatingRules {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
            adjustment: Adjustment::default(),
        }
    }
}

impl RatingRules {
    /// Parses and validates a rule table from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for malformed TOML and
    /// [`ConfigError::InvalidRules`] if the buckets have gaps or overlaps.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let rules: Self = toml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reads a rule table from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks that the buckets cover `[0, ∞)` exactly once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::InvalidRules(msg));

        let Some(first) = self.buckets.first() else {
            return invalid("bucket table is empty".to_string());
        };
        if first.min != 0 {
            return invalid(format!("first bucket starts at {}, expected 0", first.min));
        }

        let last_index = self.buckets.len() - 1;
        for (i, bucket) in self.buckets.iter().enumerate() {
            match bucket.max {
                Some(max) if max < bucket.min => {
                    return invalid(format!("bucket {i} has max {max} below min {}", bucket.min));
                }
                Some(max) if i == last_index => {
                    return invalid(format!("last bucket ends at {max}, expected unbounded"));
                }
                None if i != last_index => {
                    return invalid(format!("bucket {i} is unbounded but not last"));
                }
                _ => {}
            }

            if let Some(next) = self.buckets.get(i + 1) {
                let expected = bucket.max.and_then(|max| max.checked_add(1));
                if expected != Some(next.min) {
                    return invalid(format!(
                        "bucket {} starts at {}, expected {}",
                        i + 1,
                        next.min,
                        expected.map_or_else(|| "none".to_string(), |m| m.to_string())
                    ));
                }
            }
        }

        Ok(())
    }

    /// Finds the bucket covering `diff`.
    pub fn bucket_for(&self, diff: u32) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.contains(diff))
    }
}
