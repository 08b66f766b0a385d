//! Display-only accuracy estimate.

/// Rating that counts as 100% in [`accuracy`].
pub const ELITE_RATING: f64 = 2300.0;

/// Formats a player's accuracy as a percentage with one decimal, e.g. `"87.5%"`.
///
/// Returns `"0%"` when no rounds have been played. The points-per-round rate
/// is capped at 1 so bonus-scored formats cannot exceed full consistency.
pub fn accuracy(points: f64, total_rounds: u32, rating: i32) -> String {
    accuracy_with_baseline(points, total_rounds, rating, ELITE_RATING)
}

/// Like [`accuracy`] with a custom elite baseline.
pub fn accuracy_with_baseline(points: f64, total_rounds: u32, rating: i32, elite: f64) -> String {
    if total_rounds == 0 {
        return "0%".to_string();
    }

    let rate = (points / f64::from(total_rounds)).min(1.0);
    let factor = f64::from(rating) / elite;
    format!("{:.1}%", rate * factor * 100.0)
}
