//! Amenity accessibility scoring for a geographic point.
//!
//! Given an origin, a radius, and two prebuilt amenity collections, the
//! engine answers how well the point is served by nearby amenities: it finds
//! candidates per semantic category, ranks representative examples by tag
//! relevance, aggregates count and nearest-distance statistics over the full
//! candidate set, and derives a saturating 0–10 score per category plus a
//! weighted overall score.
//!
//! Distance work is deliberately simple: a bounding-box prefilter over raw
//! coordinates followed by an exact haversine cutoff. No spatial index is
//! kept between queries; collections are immutable for the run and every
//! query re-scans them.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use nearscore_core::{
//!     AmenityRecord, AmenityTags, Category, MemorySource, QueryEngine, QueryRequest,
//! };
//!
//! let origin = Coord { x: 4.3517, y: 50.8466 };
//! let records = vec![
//!     AmenityRecord::new(
//!         1,
//!         Category::Transit,
//!         Coord { x: origin.x, y: origin.y + 0.003 },
//!         AmenityTags { railway: Some("station".into()), ..AmenityTags::default() },
//!     ),
//!     AmenityRecord::new(
//!         2,
//!         Category::Market,
//!         Coord { x: origin.x + 0.004, y: origin.y },
//!         AmenityTags { shop: Some("supermarket".into()), ..AmenityTags::default() },
//!     ),
//! ];
//!
//! let engine = QueryEngine::new(MemorySource::new(records));
//! let request = QueryRequest::new(origin, 2_500.0, 5)?;
//! let result = engine.run(&request);
//!
//! assert_eq!(result.categories.len(), 6);
//! assert!(result.overall_score > 0.0);
//! assert!(result.overall_score <= 10.0);
//! # Ok::<(), nearscore_core::QueryRequestError>(())
//! ```

#![forbid(unsafe_code)]

pub mod amenity;
pub mod config;
pub mod filter;
pub mod geocode;
pub mod geodesy;
pub mod query;
pub mod rank;
pub mod score;
pub mod source;
pub mod stats;
pub mod travel;

pub use amenity::{AmenityRecord, AmenityTags, Category, ParseCategoryError};
pub use config::{BonusRule, CategoryConfig, ConfigError, OverallWeights, ScoringConfig, TravelParams};
pub use filter::{Candidate, filter_within_radius};
pub use geocode::{GeocodeError, Geocoder, ResolvedLocation};
pub use query::{
    CategoryResult, QueryEngine, QueryError, QueryRequest, QueryRequestError, QueryResult,
    RankedAmenity,
};
pub use rank::{TagPredicate, rank_candidates, relevance};
pub use score::{category_score, overall_score};
pub use source::{CandidateSource, MemorySource};
pub use stats::{CategoryStats, aggregate};
pub use travel::TravelEstimate;

#[cfg(feature = "source-sqlite")]
pub use source::sqlite::{AmenitySourceError, SqliteAmenitySource};
