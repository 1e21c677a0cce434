//! Read-only access to the prebuilt amenity collections.
//!
//! The `CandidateSource` trait hands the engine one category's records at a
//! time. Scans are idempotent and the collections are immutable for the run,
//! so implementations may cache freely, but no spatial index is kept across
//! queries: every query re-scans the collection.

use crate::amenity::{AmenityRecord, Category};

#[cfg(feature = "source-sqlite")]
pub mod sqlite;

/// Read-only, per-category access to the amenity collections.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearscore_core::{AmenityRecord, AmenityTags, CandidateSource, Category, MemorySource};
///
/// let record = AmenityRecord::new(
///     1,
///     Category::Park,
///     Coord { x: 4.35, y: 50.85 },
///     AmenityTags::default(),
/// );
/// let source = MemorySource::new(vec![record]);
/// assert_eq!(source.scan(Category::Park).count(), 1);
/// assert_eq!(source.scan(Category::Market).count(), 0);
/// ```
pub trait CandidateSource {
    /// Return every record carrying `category`.
    fn scan(&self, category: Category) -> Box<dyn Iterator<Item = AmenityRecord> + Send + '_>;
}

/// In-memory candidate source over a flat record list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    records: Vec<AmenityRecord>,
}

impl MemorySource {
    /// Wrap a list of records.
    #[must_use]
    pub const fn new(records: Vec<AmenityRecord>) -> Self {
        Self { records }
    }

    /// Total number of records across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the source holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CandidateSource for MemorySource {
    fn scan(&self, category: Category) -> Box<dyn Iterator<Item = AmenityRecord> + Send + '_> {
        Box::new(
            self.records
                .iter()
                .filter(move |record| record.category == category)
                .cloned(),
        )
    }
}
