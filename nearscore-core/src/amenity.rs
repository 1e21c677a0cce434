//! Amenity records and their semantic categories.
//!
//! One [`AmenityRecord`] corresponds to one row of the prebuilt amenity
//! collections. Records are produced by the offline extraction pipeline and
//! never mutated by the engine.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Semantic amenity categories recognised by the engine.
///
/// The enum offers compile-time safety for category lookups. Labels match the
/// `cat` column written by the extraction pipeline.
///
/// # Examples
/// ```
/// use nearscore_core::Category;
///
/// assert_eq!(Category::Health.as_str(), "health");
/// assert_eq!("transit".parse(), Ok(Category::Transit));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Schools, colleges and kindergartens.
    School,
    /// Supermarkets, convenience shops and marketplaces.
    Market,
    /// Hospitals, clinics, practices and pharmacies.
    Health,
    /// Rail, tram, metro and bus infrastructure.
    Transit,
    /// Parks, gardens and other green space.
    Park,
    /// Gyms, sports centres and sports grounds.
    Sport,
}

impl Category {
    /// All categories in their canonical reporting order.
    pub const ALL: [Self; 6] = [
        Self::School,
        Self::Market,
        Self::Health,
        Self::Transit,
        Self::Park,
        Self::Sport,
    ];

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Market => "market",
            Self::Health => "health",
            Self::Transit => "transit",
            Self::Park => "park",
            Self::Sport => "sport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown amenity category '{value}'")]
pub struct ParseCategoryError {
    /// The rejected label.
    pub value: String,
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school" => Ok(Self::School),
            "market" => Ok(Self::Market),
            "health" => Ok(Self::Health),
            "transit" => Ok(Self::Transit),
            "park" => Ok(Self::Park),
            "sport" => Ok(Self::Sport),
            other => Err(ParseCategoryError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Descriptive tag attributes carried by every amenity record.
///
/// The set of attributes is fixed by the extraction pipeline's schema. The
/// relevance tables and bonus predicates read these fields; the engine never
/// interprets them otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmenityTags {
    /// OSM `amenity` value, e.g. `school` or `hospital`.
    pub amenity: Option<String>,
    /// OSM `shop` value, e.g. `supermarket`.
    pub shop: Option<String>,
    /// OSM `healthcare` value, e.g. `clinic`.
    pub healthcare: Option<String>,
    /// OSM `railway` value, e.g. `station`.
    pub railway: Option<String>,
    /// OSM `highway` value, e.g. `bus_stop`.
    pub highway: Option<String>,
    /// OSM `public_transport` value, e.g. `platform`.
    pub public_transport: Option<String>,
    /// OSM `leisure` value, e.g. `park`.
    pub leisure: Option<String>,
    /// OSM `boundary` value, e.g. `national_park`.
    pub boundary: Option<String>,
    /// OSM `landuse` value, e.g. `grass`.
    pub landuse: Option<String>,
    /// OSM `sport` value, e.g. `fitness`.
    pub sport: Option<String>,
    /// OSM `school:level` value.
    pub school_level: Option<String>,
    /// OSM `isced:level` value.
    pub isced_level: Option<String>,
}

/// One row of input data: a point of interest assigned to a category.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. A record
/// tagged with several categories appears once per category in the input
/// collections; the engine does not deduplicate across categories.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearscore_core::{AmenityRecord, AmenityTags, Category};
///
/// let record = AmenityRecord::new(
///     7,
///     Category::Market,
///     Coord { x: 4.35, y: 50.85 },
///     AmenityTags {
///         shop: Some("supermarket".into()),
///         ..AmenityTags::default()
///     },
/// );
/// assert_eq!(record.category, Category::Market);
/// assert!(record.brand.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmenityRecord {
    /// Identifier assigned by the extraction pipeline.
    pub id: i64,
    /// Semantic category of this row.
    pub category: Category,
    /// Display name, when the source object carries one.
    pub name: Option<String>,
    /// Brand name; present only in polygon-derived records.
    pub brand: Option<String>,
    /// Geospatial position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Descriptive tag attributes.
    pub tags: AmenityTags,
}

impl AmenityRecord {
    /// Construct a record without name or brand.
    #[must_use]
    pub const fn new(id: i64, category: Category, location: Coord<f64>, tags: AmenityTags) -> Self {
        Self {
            id,
            category,
            name: None,
            brand: None,
            location,
            tags,
        }
    }
}
