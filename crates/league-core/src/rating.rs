//! Rating change calculation.
//!
//! The calculator maps one match outcome between two rated players to a
//! pair of integer deltas using a [`RatingRules`] table:
//!
//! 1. The bucket covering `|rating_a - rating_b|` supplies win/loss/draw
//!    figures for the two sides.
//! 2. If the ratings differ, a decisive result discards those figures and
//!    uses the adjustment record instead, keyed by whether the stronger
//!    player won or lost. A draw keeps the bucket's draw figure and adds
//!    the adjustment's draw nudge to it.
//!
//! Streak multipliers are applied afterwards by the caller, see
//! [`crate::streak`].

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::rules::{RatingRules, SideDelta};

/// Rating deltas for the two sides of one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub change_a: i32,
    pub change_b: i32,
}

impl RatingChange {
    pub const ZERO: RatingChange = RatingChange {
        change_a: 0,
        change_b: 0,
    };

    /// The same change seen from B's side.
    pub fn swapped(self) -> Self {
        Self {
            change_a: self.change_b,
            change_b: self.change_a,
        }
    }
}

/// Computes rating deltas from an injected rule table.
#[derive(Debug, Clone, Default)]
pub struct RatingCalculator {
    rules: RatingRules,
}

impl RatingCalculator {
    pub fn new(rules: RatingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RatingRules {
        &self.rules
    }

    /// Computes the deltas for A and B given their ratings and scores.
    ///
    /// Pure and deterministic. A bucket lookup miss (only possible with an
    /// unvalidated table) yields [`RatingChange::ZERO`].
    pub fn compute_rating_change(
        &self,
        rating_a: i32,
        rating_b: i32,
        score_a: f64,
        score_b: f64,
    ) -> RatingChange {
        let diff = u32::try_from((i64::from(rating_a) - i64::from(rating_b)).unsigned_abs())
            .unwrap_or(u32::MAX);

        let Some(bucket) = self.rules.bucket_for(diff) else {
            tracing::warn!(diff, "no rating bucket covers difference, returning zero change");
            return RatingChange::ZERO;
        };

        let result = score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
        let base = match result {
            Ordering::Greater => RatingChange {
                change_a: bucket.win,
                change_b: bucket.loss,
            },
            Ordering::Less => RatingChange {
                change_a: bucket.loss,
                change_b: bucket.win,
            },
            Ordering::Equal => RatingChange {
                change_a: bucket.draw,
                change_b: bucket.draw,
            },
        };

        let change = match rating_a.cmp(&rating_b) {
            Ordering::Equal => base,
            Ordering::Greater => self.adjust(base, result),
            // Mirror the problem so A is always the stronger side.
            Ordering::Less => self.adjust(base.swapped(), result.reverse()).swapped(),
        };

        tracing::debug!(
            rating_a,
            rating_b,
            score_a,
            score_b,
            change_a = change.change_a,
            change_b = change.change_b,
            "computed rating change"
        );
        change
    }

    /// Applies the adjustment record with A as the strictly stronger player.
    fn adjust(&self, base: RatingChange, result: Ordering) -> RatingChange {
        let adjustment = &self.rules.adjustment;
        let replace = |delta: SideDelta| RatingChange {
            change_a: delta.strong,
            change_b: delta.weak,
        };

        match result {
            Ordering::Greater => replace(adjustment.stronger_win),
            Ordering::Less => replace(adjustment.stronger_loss),
            Ordering::Equal => RatingChange {
                change_a: base.change_a + adjustment.stronger_draw.strong,
                change_b: base.change_b + adjustment.stronger_draw.weak,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Adjustment, Bucket};
    use proptest::prelude::*;

    fn calc() -> RatingCalculator {
        RatingCalculator::default()
    }

    fn change(change_a: i32, change_b: i32) -> RatingChange {
        RatingChange { change_a, change_b }
    }

    #[test]
    fn test_equal_ratings_use_bucket() {
        let c = calc();
        assert_eq!(c.compute_rating_change(1200, 1200, 1.0, 0.0), change(1, -2));
        assert_eq!(c.compute_rating_change(1200, 1200, 0.0, 1.0), change(-2, 1));
        assert_eq!(c.compute_rating_change(1200, 1200, 0.5, 0.5), change(0, 0));
    }

    #[test]
    fn test_stronger_wins_replaces_bucket() {
        // diff 250 would give +5/-6 from the bucket
        let c = calc();
        assert_eq!(c.compute_rating_change(1450, 1200, 1.0, 0.0), change(1, -2));
        assert_eq!(c.compute_rating_change(1200, 1450, 0.0, 2.0), change(-2, 1));
    }

    #[test]
    fn test_stronger_loses_replaces_bucket() {
        let c = calc();
        assert_eq!(c.compute_rating_change(1300, 1280, 0.0, 1.0), change(-3, 3));
        assert_eq!(c.compute_rating_change(1280, 1300, 1.0, 0.0), change(3, -3));
    }

    #[test]
    fn test_unequal_draw_adds_to_bucket_draw() {
        let c = calc();
        // diff 5 -> draw 0, nudged to -1/+1
        assert_eq!(c.compute_rating_change(1205, 1200, 0.5, 0.5), change(-1, 1));
        // diff 150 -> draw 3, nudged to 2/4
        assert_eq!(c.compute_rating_change(1350, 1200, 1.0, 1.0), change(2, 4));
        // weaker side as A
        assert_eq!(c.compute_rating_change(1200, 1350, 1.0, 1.0), change(4, 2));
        // diff 300 -> draw 4, nudged to 3/5
        assert_eq!(c.compute_rating_change(1500, 1200, 0.5, 0.5), change(3, 5));
    }

    #[test]
    fn test_mini_match_scores_are_ordinal() {
        let c = calc();
        assert_eq!(
            c.compute_rating_change(1200, 1200, 2.0, 0.0),
            c.compute_rating_change(1200, 1200, 1.0, 0.0)
        );
        assert_eq!(
            c.compute_rating_change(1200, 1200, 1.0, 1.0),
            c.compute_rating_change(1200, 1200, 0.5, 0.5)
        );
    }

    #[test]
    fn test_bucket_miss_returns_zero() {
        let rules = RatingRules {
            buckets: vec![Bucket::new(0, Some(10), 1, -2, 0)],
            adjustment: Adjustment::default(),
        };
        let c = RatingCalculator::new(rules);
        assert_eq!(c.compute_rating_change(1500, 1200, 1.0, 0.0), RatingChange::ZERO);
        assert_eq!(c.compute_rating_change(1200, 1200, 1.0, 0.0), change(1, -2));
    }

    #[test]
    fn test_substituted_rules() {
        let rules = RatingRules {
            buckets: vec![Bucket::new(0, None, 10, -10, 0)],
            adjustment: Adjustment::default(),
        };
        let c = RatingCalculator::new(rules);
        assert_eq!(c.compute_rating_change(1000, 1000, 1.0, 0.0), change(10, -10));
    }

    #[test]
    fn test_extreme_ratings_do_not_overflow() {
        let c = calc();
        assert_eq!(c.compute_rating_change(i32::MAX, i32::MIN, 1.0, 0.0), change(1, -2));
    }

    fn allowed_values(rules: &RatingRules) -> Vec<i32> {
        let a = &rules.adjustment;
        let mut values = vec![
            a.stronger_win.strong,
            a.stronger_win.weak,
            a.stronger_loss.strong,
            a.stronger_loss.weak,
        ];
        for b in &rules.buckets {
            values.extend([
                b.win,
                b.loss,
                b.draw,
                b.draw + a.stronger_draw.strong,
                b.draw + a.stronger_draw.weak,
            ]);
        }
        values
    }

    proptest! {
        #[test]
        fn prop_swapping_sides_swaps_deltas(
            rating_a in 0i32..3000,
            rating_b in 0i32..3000,
            score_a in prop::sample::select(vec![0.0, 0.5, 1.0, 1.5, 2.0]),
            score_b in prop::sample::select(vec![0.0, 0.5, 1.0, 1.5, 2.0]),
        ) {
            let c = calc();
            let forward = c.compute_rating_change(rating_a, rating_b, score_a, score_b);
            let backward = c.compute_rating_change(rating_b, rating_a, score_b, score_a);
            prop_assert_eq!(forward, backward.swapped());
        }

        #[test]
        fn prop_deltas_come_from_the_rule_table(
            rating_a in 0i32..3000,
            rating_b in 0i32..3000,
            score_a in 0u8..3,
            score_b in 0u8..3,
        ) {
            let c = calc();
            let allowed = allowed_values(c.rules());
            let result = c.compute_rating_change(
                rating_a,
                rating_b,
                f64::from(score_a),
                f64::from(score_b),
            );
            prop_assert!(allowed.contains(&result.change_a));
            prop_assert!(allowed.contains(&result.change_b));
        }
    }
}
