//! Single-pass aggregate statistics over the full filtered candidate set.
//!
//! The aggregates feed both the presentation layer and the category scorer.
//! They are always computed over every in-radius candidate, never over the
//! top-N subset: a category can be well served by many facilities that a
//! short example list does not show.

use crate::filter::Candidate;
use crate::rank::TagPredicate;

/// Aggregates for one category's filtered candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryStats {
    /// Number of candidates within the query radius.
    pub n_total: usize,
    /// Distance of the nearest candidate in metres, absent when the set is
    /// empty.
    pub d_min: Option<f64>,
    /// Whether any candidate satisfied the category's bonus predicate.
    /// Categories without a bonus rule always report `false`.
    pub bonus_active: bool,
}

/// Fold the candidate set into [`CategoryStats`] in one pass.
#[must_use]
pub fn aggregate(candidates: &[Candidate], bonus_predicate: Option<TagPredicate>) -> CategoryStats {
    let mut stats = CategoryStats::default();
    for candidate in candidates {
        stats.n_total += 1;
        stats.d_min = Some(
            stats
                .d_min
                .map_or(candidate.distance_m, |d| d.min(candidate.distance_m)),
        );
        if let Some(predicate) = bonus_predicate {
            stats.bonus_active = stats.bonus_active || predicate(&candidate.record.tags);
        }
    }
    stats
}
