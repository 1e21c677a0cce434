//! The two-stage scoring model.
//!
//! A category score combines a saturating proximity term and a saturating
//! count term, plus an optional bonus, clamped to `[0, 10]`. The overall
//! score is a plain weighted sum of category scores; weights are used as-is
//! even when they do not sum to 1.0.

use crate::amenity::Category;
use crate::config::{CategoryConfig, OverallWeights};
use crate::stats::CategoryStats;

/// Map aggregate statistics to a bounded category score in `[0, 10]`.
///
/// - Proximity: zero when the set is empty, otherwise
///   `max(0, 1 - min(d_min, D0) / D0) * proximity_weight`.
/// - Count: `min(n_total, Nsat) / Nsat * count_weight`.
/// - Bonus: `bonus.amount` added when the category defines a bonus and it
///   fired.
///
/// For fixed `n_total`, a smaller `d_min` never lowers the score; for fixed
/// `d_min`, a larger `n_total` never lowers it, and the count term is flat
/// beyond Nsat.
///
/// # Examples
/// ```
/// use nearscore_core::{CategoryConfig, CategoryStats, category_score};
///
/// let config = CategoryConfig {
///     saturation_distance_m: 4_000.0,
///     proximity_weight: 7.0,
///     count_weight: 3.0,
///     count_saturation: 3,
///     bonus: None,
/// };
/// let stats = CategoryStats { n_total: 5, d_min: Some(1_000.0), bonus_active: false };
/// assert!((category_score(&config, &stats) - 8.25).abs() < 1e-9);
/// ```
#[must_use]
pub fn category_score(config: &CategoryConfig, stats: &CategoryStats) -> f64 {
    let proximity_points = match stats.d_min {
        Some(d_min) if stats.n_total > 0 => {
            let d0 = config.saturation_distance_m;
            let proximity_norm = (1.0 - d_min.min(d0) / d0).max(0.0);
            proximity_norm * config.proximity_weight
        }
        _ => 0.0,
    };

    let capped_count = u32::try_from(stats.n_total)
        .unwrap_or(u32::MAX)
        .min(config.count_saturation);
    let count_norm = f64::from(capped_count) / f64::from(config.count_saturation);
    let count_points = count_norm * config.count_weight;

    let mut score = proximity_points + count_points;
    if let Some(bonus) = config.bonus {
        if stats.bonus_active {
            score += bonus.amount;
        }
    }
    score.clamp(0.0, 10.0)
}

/// Weighted combination of category scores into a single `[0, 10]` figure.
///
/// No renormalization is applied; when the weights sum to 1.0 the result lies
/// in `[0, 10]` by construction.
#[must_use]
pub fn overall_score<I>(weights: &OverallWeights, category_scores: I) -> f64
where
    I: IntoIterator<Item = (Category, f64)>,
{
    category_scores
        .into_iter()
        .map(|(category, score)| weights.get(category) * score)
        .sum()
}
