//! Query orchestration and result types.
//!
//! One query runs each configured category through the same pipeline:
//! scan the source, filter by radius, rank for presentation, aggregate for
//! scoring, score. The overall score combines the category scores once all
//! categories are done.

use geo::Coord;
use thiserror::Error;

use crate::amenity::Category;
use crate::config::{CategoryConfig, OverallWeights, ScoringConfig, TravelParams};
use crate::filter::filter_within_radius;
use crate::geocode::{GeocodeError, Geocoder, ResolvedLocation};
use crate::rank::rank_candidates;
use crate::score::{category_score, overall_score};
use crate::source::CandidateSource;
use crate::stats::aggregate;
use crate::travel::TravelEstimate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single accessibility query.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearscore_core::QueryRequest;
///
/// let request = QueryRequest::new(Coord { x: 4.35, y: 50.85 }, 2_500.0, 5)?;
/// assert_eq!(request.top_n, 5);
/// # Ok::<(), nearscore_core::QueryRequestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryRequest {
    /// Query origin (`x = longitude`, `y = latitude`).
    pub origin: Coord<f64>,
    /// Search radius in metres.
    pub radius_m: f64,
    /// Maximum number of examples reported per category.
    pub top_n: usize,
}

/// Errors returned by [`QueryRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryRequestError {
    /// The radius was zero, negative, or not finite.
    #[error("query radius must be finite and positive")]
    NonPositiveRadius,
    /// `top_n` was zero.
    #[error("top_n must be at least 1")]
    ZeroTopN,
}

impl QueryRequest {
    /// Validate and construct a request.
    ///
    /// # Errors
    /// Returns [`QueryRequestError`] for a degenerate radius or `top_n`;
    /// these are caller contract violations and are rejected before any
    /// query work happens.
    pub fn new(origin: Coord<f64>, radius_m: f64, top_n: usize) -> Result<Self, QueryRequestError> {
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(QueryRequestError::NonPositiveRadius);
        }
        if top_n == 0 {
            return Err(QueryRequestError::ZeroTopN);
        }
        Ok(Self {
            origin,
            radius_m,
            top_n,
        })
    }
}

/// One ranked example within a category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedAmenity {
    /// 1-based rank within the category.
    pub rank: usize,
    /// The amenity record.
    pub record: crate::amenity::AmenityRecord,
    /// Exact great-circle distance from the origin, in metres.
    pub distance_m: f64,
    /// Walking and driving estimates for that distance.
    pub travel: TravelEstimate,
}

/// Results for one category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoryResult {
    /// The category.
    pub category: Category,
    /// Top-ranked examples, at most `top_n` of them.
    pub matches: Vec<RankedAmenity>,
    /// Number of candidates within the radius.
    pub n_total: usize,
    /// Nearest candidate distance in metres, absent when the set is empty.
    pub d_min: Option<f64>,
    /// Whether the category's bonus predicate fired.
    pub bonus_active: bool,
    /// Category accessibility score in `[0, 10]`.
    pub score: f64,
}

/// The full result of one query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryResult {
    /// Query origin.
    pub origin: Coord<f64>,
    /// Search radius in metres.
    pub radius_m: f64,
    /// Per-category results in canonical category order.
    pub categories: Vec<CategoryResult>,
    /// Weighted overall score in `[0, 10]` when weights sum to 1.
    pub overall_score: f64,
}

/// Errors returned by [`QueryEngine::run_at_address`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Address resolution failed.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    /// The derived request was degenerate.
    #[error(transparent)]
    Request(#[from] QueryRequestError),
}

/// The spatial query and scoring engine.
///
/// Holds a candidate source plus immutable configuration; [`QueryEngine::run`]
/// is read-only and side-effect free, so repeated runs over unchanged
/// collections return identical results.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearscore_core::{
///     AmenityRecord, AmenityTags, Category, MemorySource, QueryEngine, QueryRequest,
/// };
///
/// let origin = Coord { x: 4.35, y: 50.85 };
/// let records = vec![AmenityRecord::new(
///     1,
///     Category::Market,
///     Coord { x: origin.x, y: origin.y + 0.002 },
///     AmenityTags { shop: Some("supermarket".into()), ..AmenityTags::default() },
/// )];
/// let engine = QueryEngine::new(MemorySource::new(records));
/// let request = QueryRequest::new(origin, 2_500.0, 5)?;
///
/// let result = engine.run(&request);
/// assert!(result.overall_score > 0.0);
/// # Ok::<(), nearscore_core::QueryRequestError>(())
/// ```
#[derive(Debug)]
pub struct QueryEngine<S> {
    source: S,
    scoring: ScoringConfig,
    weights: OverallWeights,
    travel: TravelParams,
}

impl<S: CandidateSource> QueryEngine<S> {
    /// Build an engine over `source` with the default configuration.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(
            source,
            ScoringConfig::default(),
            OverallWeights::default(),
            TravelParams::default(),
        )
    }

    /// Build an engine with explicit configuration.
    ///
    /// All three configuration types validate at construction, so queries
    /// themselves cannot fail.
    #[must_use]
    pub const fn with_config(
        source: S,
        scoring: ScoringConfig,
        weights: OverallWeights,
        travel: TravelParams,
    ) -> Self {
        Self {
            source,
            scoring,
            weights,
            travel,
        }
    }

    /// Execute one query.
    ///
    /// Each configured category is processed independently; a category with
    /// no candidates is reported with `n_total = 0`, no `d_min` and a zero
    /// score, not an error.
    #[must_use]
    pub fn run(&self, request: &QueryRequest) -> QueryResult {
        let categories: Vec<CategoryResult> = self
            .scoring
            .iter()
            .map(|(category, config)| self.run_category(category, config, request))
            .collect();
        let overall = overall_score(
            &self.weights,
            categories.iter().map(|result| (result.category, result.score)),
        );
        QueryResult {
            origin: request.origin,
            radius_m: request.radius_m,
            categories,
            overall_score: overall,
        }
    }

    /// Resolve an address through `geocoder`, then execute the query at the
    /// resolved coordinate.
    ///
    /// # Errors
    /// Returns [`QueryError::Geocode`] when the address does not resolve and
    /// [`QueryError::Request`] for a degenerate radius or `top_n`. No retries
    /// are attempted here.
    pub fn run_at_address(
        &self,
        geocoder: &dyn Geocoder,
        address: &str,
        radius_m: f64,
        top_n: usize,
    ) -> Result<(ResolvedLocation, QueryResult), QueryError> {
        let resolved = geocoder.resolve(address)?;
        let request = QueryRequest::new(resolved.location, radius_m, top_n)?;
        let result = self.run(&request);
        Ok((resolved, result))
    }

    fn run_category(
        &self,
        category: Category,
        config: &CategoryConfig,
        request: &QueryRequest,
    ) -> CategoryResult {
        let candidates =
            filter_within_radius(self.source.scan(category), request.origin, request.radius_m);
        let stats = aggregate(&candidates, config.bonus.map(|bonus| bonus.predicate));
        let score = category_score(config, &stats);

        let matches = rank_candidates(category, candidates, request.top_n)
            .into_iter()
            .zip(1..)
            .map(|(candidate, rank)| RankedAmenity {
                rank,
                travel: self.travel.estimate(candidate.distance_m),
                distance_m: candidate.distance_m,
                record: candidate.record,
            })
            .collect();

        log::debug!(
            "category {category}: {count} candidates within {radius} m, score {score:.2}",
            count = stats.n_total,
            radius = request.radius_m,
        );

        CategoryResult {
            category,
            matches,
            n_total: stats.n_total,
            d_min: stats.d_min,
            bonus_active: stats.bonus_active,
            score,
        }
    }
}
