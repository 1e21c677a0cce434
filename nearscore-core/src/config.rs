//! Immutable engine configuration.
//!
//! Category scoring parameters, overall weights and travel constants are
//! constructed once at startup and passed into the engine explicitly; there
//! is no ambient global state. Constructors validate so that query execution
//! is infallible.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::amenity::{AmenityTags, Category};
use crate::rank::TagPredicate;

/// Error raised when building configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The saturation distance was not finite and positive.
    #[error("saturation distance for {category} must be finite and positive")]
    InvalidSaturationDistance {
        /// Category carrying the invalid value.
        category: Category,
    },
    /// The count saturation was zero.
    #[error("count saturation for {category} must be at least 1")]
    InvalidCountSaturation {
        /// Category carrying the invalid value.
        category: Category,
    },
    /// A proximity or count weight was negative or not finite.
    #[error("scoring weights for {category} must be finite and non-negative")]
    InvalidScoringWeight {
        /// Category carrying the invalid value.
        category: Category,
    },
    /// A bonus amount was negative or not finite.
    #[error("bonus amount for {category} must be finite and non-negative")]
    InvalidBonusAmount {
        /// Category carrying the invalid value.
        category: Category,
    },
    /// An overall weight was negative or not finite.
    #[error("overall weight for {category} must be finite and non-negative")]
    InvalidOverallWeight {
        /// Category carrying the invalid value.
        category: Category,
    },
    /// A travel speed was not finite and positive.
    #[error("travel speeds must be finite and positive")]
    InvalidTravelSpeed,
    /// A circuity factor was below 1.0 or not finite.
    #[error("circuity factors must be finite and at least 1.0")]
    InvalidCircuity,
}

/// Optional score bonus granted when any candidate matches a predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusRule {
    /// Points added to the category score when the predicate fires.
    pub amount: f64,
    /// Predicate evaluated against every candidate's tags.
    pub predicate: TagPredicate,
}

/// Scoring parameters for one category.
///
/// `proximity_weight + count_weight` caps the pre-bonus score; any overflow
/// beyond 10 is absorbed by the final clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryConfig {
    /// Distance in metres beyond which proximity contributes nothing (D0).
    pub saturation_distance_m: f64,
    /// Points available from the proximity term.
    pub proximity_weight: f64,
    /// Points available from the count term.
    pub count_weight: f64,
    /// Candidate count at which the count term saturates (Nsat).
    pub count_saturation: u32,
    /// Optional bonus rule.
    pub bonus: Option<BonusRule>,
}

impl CategoryConfig {
    fn validate(&self, category: Category) -> Result<(), ConfigError> {
        if !(self.saturation_distance_m.is_finite() && self.saturation_distance_m > 0.0) {
            return Err(ConfigError::InvalidSaturationDistance { category });
        }
        if self.count_saturation == 0 {
            return Err(ConfigError::InvalidCountSaturation { category });
        }
        let weight_ok =
            |w: f64| w.is_finite() && w >= 0.0;
        if !(weight_ok(self.proximity_weight) && weight_ok(self.count_weight)) {
            return Err(ConfigError::InvalidScoringWeight { category });
        }
        if let Some(bonus) = self.bonus {
            if !weight_ok(bonus.amount) {
                return Err(ConfigError::InvalidBonusAmount { category });
            }
        }
        Ok(())
    }
}

fn hospital_present(tags: &AmenityTags) -> bool {
    tags.amenity.as_deref() == Some("hospital") || tags.healthcare.as_deref() == Some("hospital")
}

/// Per-category scoring configuration.
///
/// The key set decides which categories a query processes; iteration order is
/// the canonical category order, keeping results deterministic.
///
/// # Examples
/// ```
/// use nearscore_core::{Category, ScoringConfig};
///
/// let config = ScoringConfig::default();
/// let health = config.get(Category::Health).expect("default covers health");
/// assert!(health.bonus.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    configs: BTreeMap<Category, CategoryConfig>,
}

impl ScoringConfig {
    /// Create a configuration covering no categories.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            configs: BTreeMap::new(),
        }
    }

    /// Insert or replace the configuration for a category.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration values are out of
    /// range.
    pub fn insert(&mut self, category: Category, config: CategoryConfig) -> Result<(), ConfigError> {
        config.validate(category)?;
        self.configs.insert(category, config);
        Ok(())
    }

    /// Configuration for a category, when present.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&CategoryConfig> {
        self.configs.get(&category)
    }

    /// Iterate over the configured categories in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryConfig)> {
        self.configs.iter().map(|(category, config)| (*category, config))
    }

    /// Number of configured categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether no category is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let configs = BTreeMap::from([
            (
                Category::School,
                CategoryConfig {
                    saturation_distance_m: 2_000.0,
                    proximity_weight: 5.0,
                    count_weight: 5.0,
                    count_saturation: 4,
                    bonus: None,
                },
            ),
            (
                Category::Market,
                CategoryConfig {
                    saturation_distance_m: 1_500.0,
                    proximity_weight: 6.0,
                    count_weight: 4.0,
                    count_saturation: 3,
                    bonus: None,
                },
            ),
            (
                Category::Health,
                CategoryConfig {
                    saturation_distance_m: 4_000.0,
                    proximity_weight: 7.0,
                    count_weight: 3.0,
                    count_saturation: 3,
                    bonus: Some(BonusRule {
                        amount: 1.0,
                        predicate: hospital_present,
                    }),
                },
            ),
            (
                Category::Transit,
                CategoryConfig {
                    saturation_distance_m: 800.0,
                    proximity_weight: 7.0,
                    count_weight: 3.0,
                    count_saturation: 5,
                    bonus: None,
                },
            ),
            (
                Category::Park,
                CategoryConfig {
                    saturation_distance_m: 1_200.0,
                    proximity_weight: 6.0,
                    count_weight: 4.0,
                    count_saturation: 3,
                    bonus: None,
                },
            ),
            (
                Category::Sport,
                CategoryConfig {
                    saturation_distance_m: 1_500.0,
                    proximity_weight: 5.0,
                    count_weight: 5.0,
                    count_saturation: 3,
                    bonus: None,
                },
            ),
        ]);
        Self { configs }
    }
}

/// Weights combining category scores into the overall score.
///
/// Weights are intended to sum to 1.0 but are used as-is when they do not; no
/// renormalization is applied. Categories without an entry weigh zero.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallWeights {
    weights: BTreeMap<Category, f64>,
}

impl OverallWeights {
    /// Validate and wrap a weight table.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidOverallWeight`] when a weight is
    /// negative or not finite.
    pub fn new(weights: BTreeMap<Category, f64>) -> Result<Self, ConfigError> {
        if let Some((category, _)) = weights
            .iter()
            .find(|(_, weight)| !(weight.is_finite() && **weight >= 0.0))
        {
            return Err(ConfigError::InvalidOverallWeight {
                category: *category,
            });
        }
        Ok(Self { weights })
    }

    /// Weight for a category; unlisted categories weigh zero.
    #[must_use]
    pub fn get(&self, category: Category) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                (Category::Market, 0.25),
                (Category::School, 0.25),
                (Category::Health, 0.20),
                (Category::Transit, 0.15),
                (Category::Park, 0.10),
                (Category::Sport, 0.05),
            ]),
        }
    }
}

/// Walking and driving approximation constants.
///
/// Circuity factors approximate real-route indirection over the straight-line
/// distance; speeds are cruising averages. See
/// [`TravelParams::estimate`](crate::travel) for the derived figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelParams {
    pub(crate) walk_speed_kph: f64,
    pub(crate) drive_speed_kph: f64,
    pub(crate) walk_circuity: f64,
    pub(crate) drive_circuity: f64,
}

impl TravelParams {
    /// Validate and build travel parameters.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidTravelSpeed`] for non-positive or
    /// non-finite speeds and [`ConfigError::InvalidCircuity`] for circuity
    /// factors below 1.0.
    pub fn new(
        walk_speed_kph: f64,
        drive_speed_kph: f64,
        walk_circuity: f64,
        drive_circuity: f64,
    ) -> Result<Self, ConfigError> {
        let speed_ok = |s: f64| s.is_finite() && s > 0.0;
        if !(speed_ok(walk_speed_kph) && speed_ok(drive_speed_kph)) {
            return Err(ConfigError::InvalidTravelSpeed);
        }
        let circuity_ok = |c: f64| c.is_finite() && c >= 1.0;
        if !(circuity_ok(walk_circuity) && circuity_ok(drive_circuity)) {
            return Err(ConfigError::InvalidCircuity);
        }
        Ok(Self {
            walk_speed_kph,
            drive_speed_kph,
            walk_circuity,
            drive_circuity,
        })
    }
}

impl Default for TravelParams {
    fn default() -> Self {
        Self {
            walk_speed_kph: 4.8,
            drive_speed_kph: 35.0,
            walk_circuity: 1.25,
            drive_circuity: 1.40,
        }
    }
}
