//! Facade crate for the nearscore amenity accessibility engine.
//!
//! This crate re-exports the core domain types and exposes the optional
//! SQLite-backed candidate source behind a feature flag.

#![forbid(unsafe_code)]

pub use nearscore_core::{
    AmenityRecord, AmenityTags, BonusRule, Candidate, CandidateSource, Category, CategoryConfig,
    CategoryResult, CategoryStats, ConfigError, GeocodeError, Geocoder, MemorySource,
    OverallWeights, ParseCategoryError, QueryEngine, QueryError, QueryRequest, QueryRequestError,
    QueryResult, RankedAmenity, ResolvedLocation, ScoringConfig, TagPredicate, TravelEstimate,
    TravelParams,
};

#[cfg(feature = "source-sqlite")]
pub use nearscore_core::{AmenitySourceError, SqliteAmenitySource};
