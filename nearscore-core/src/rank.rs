//! Tag-based relevance ranking of filtered candidates.
//!
//! Each category carries a fixed table of tag-pattern rules. A candidate's
//! relevance is the sum of every matching rule's weight; a record matching
//! several rules collects them all. Ranking decides which examples are shown
//! to the caller; it plays no part in the accessibility score.

use std::cmp::Reverse;

use crate::amenity::{AmenityTags, Category};
use crate::filter::Candidate;

/// Predicate over a record's descriptive tags.
pub type TagPredicate = fn(&AmenityTags) -> bool;

/// One relevance rule: a tag pattern and the weight it contributes.
type Rule = (TagPredicate, u32);

fn eq(field: &Option<String>, value: &str) -> bool {
    field.as_deref() == Some(value)
}

const SCHOOL_RULES: &[Rule] = &[
    (|t| eq(&t.amenity, "school"), 10),
    (|t| eq(&t.amenity, "college"), 7),
    (|t| eq(&t.amenity, "kindergarten"), 6),
    (|t| t.school_level.is_some(), 4),
    (|t| t.isced_level.is_some(), 4),
];

const MARKET_RULES: &[Rule] = &[
    (|t| eq(&t.shop, "supermarket"), 10),
    (|t| eq(&t.shop, "convenience"), 8),
    (|t| eq(&t.amenity, "marketplace"), 6),
];

const HEALTH_RULES: &[Rule] = &[
    (|t| eq(&t.amenity, "hospital") || eq(&t.healthcare, "hospital"), 100),
    (|t| eq(&t.amenity, "clinic") || eq(&t.healthcare, "clinic"), 80),
    (|t| eq(&t.amenity, "doctors") || eq(&t.healthcare, "doctor"), 60),
    (|t| eq(&t.amenity, "dentist") || eq(&t.healthcare, "dentist"), 55),
    (|t| eq(&t.healthcare, "physiotherapist"), 50),
    (|t| eq(&t.amenity, "pharmacy"), 40),
    (|t| t.healthcare.is_some(), 30),
];

const TRANSIT_RULES: &[Rule] = &[
    (|t| eq(&t.railway, "station"), 100),
    (|t| eq(&t.railway, "halt"), 90),
    (|t| eq(&t.amenity, "bus_station"), 80),
    (
        |t| eq(&t.railway, "tram_stop") || eq(&t.railway, "subway_entrance"),
        70,
    ),
    (|t| eq(&t.highway, "bus_stop"), 50),
    (|t| t.public_transport.is_some(), 40),
];

const PARK_RULES: &[Rule] = &[
    (|t| eq(&t.leisure, "park"), 100),
    (|t| eq(&t.leisure, "garden"), 80),
    (
        |t| eq(&t.leisure, "nature_reserve") || eq(&t.boundary, "national_park"),
        80,
    ),
    (|t| eq(&t.leisure, "recreation_ground"), 60),
    (|t| eq(&t.leisure, "playground"), 50),
    (|t| eq(&t.landuse, "grass"), 20),
    (|t| eq(&t.boundary, "national_park"), 15),
];

const SPORT_RULES: &[Rule] = &[
    (
        |t| eq(&t.leisure, "fitness_centre") || eq(&t.amenity, "gym"),
        90,
    ),
    (|t| eq(&t.leisure, "sports_centre"), 80),
    (|t| t.sport.is_some(), 20),
];

const fn rules_for(category: Category) -> &'static [Rule] {
    match category {
        Category::School => SCHOOL_RULES,
        Category::Market => MARKET_RULES,
        Category::Health => HEALTH_RULES,
        Category::Transit => TRANSIT_RULES,
        Category::Park => PARK_RULES,
        Category::Sport => SPORT_RULES,
    }
}

/// Category-specific tag-importance value for one record.
///
/// Sums every matching rule in the category's table; records matching no rule
/// score zero.
///
/// # Examples
/// ```
/// use nearscore_core::{AmenityTags, Category, relevance};
///
/// let tags = AmenityTags {
///     amenity: Some("hospital".into()),
///     healthcare: Some("hospital".into()),
///     ..AmenityTags::default()
/// };
/// // Matches the hospital rule (100) and the generic healthcare rule (30).
/// assert_eq!(relevance(Category::Health, &tags), 130);
/// ```
#[must_use]
pub fn relevance(category: Category, tags: &AmenityTags) -> u32 {
    rules_for(category)
        .iter()
        .filter(|(matches, _)| matches(tags))
        .map(|(_, weight)| *weight)
        .sum()
}

/// Order candidates by relevance descending, then distance ascending, and
/// keep the first `top_n`.
///
/// The sort is stable, so candidates tied on both keys keep their encounter
/// order.
#[must_use]
pub fn rank_candidates(
    category: Category,
    candidates: Vec<Candidate>,
    top_n: usize,
) -> Vec<Candidate> {
    let mut decorated: Vec<(u32, Candidate)> = candidates
        .into_iter()
        .map(|candidate| (relevance(category, &candidate.record.tags), candidate))
        .collect();
    decorated.sort_by(|(left_relevance, left), (right_relevance, right)| {
        Reverse(left_relevance)
            .cmp(&Reverse(right_relevance))
            .then_with(|| left.distance_m.total_cmp(&right.distance_m))
    });
    decorated.truncate(top_n);
    decorated
        .into_iter()
        .map(|(_, candidate)| candidate)
        .collect()
}
