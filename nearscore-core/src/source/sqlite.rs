//! SQLite-backed candidate source over the prebuilt amenity collections.
//!
//! The extraction pipeline writes two collections: point-located amenities
//! and polygon-centroid amenities. Each is a read-only SQLite file with an
//! `amenities` table; the point collection carries no `brand` column. Either
//! collection may be absent, but at least one is required.
//!
//! All rows are loaded once at open time and grouped by category; this is the
//! only bulk I/O the engine performs, and it happens before any query runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use geo::Coord;
use thiserror::Error;

use crate::amenity::{AmenityRecord, AmenityTags, Category};

use super::CandidateSource;

/// Columns shared by both collections, in select order.
const TAG_COLUMNS: &str = "amenity, shop, healthcare, railway, highway, public_transport, \
     leisure, boundary, landuse, sport, school_level, isced_level";

/// Error raised when opening or reading the amenity collections.
#[derive(Debug, Error)]
pub enum AmenitySourceError {
    /// Neither the point nor the polygon collection was provided.
    #[error("no amenity collection provided; at least one of the point or polygon collections is required")]
    NoCollections,
    /// Opening a collection database failed.
    #[error("failed to open amenity collection at {path}: {source}")]
    OpenDatabase {
        /// Location of the collection on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Reading rows from a collection failed.
    #[error("failed to {operation} from {path}: {source}")]
    Query {
        /// The read step that failed.
        operation: &'static str,
        /// Location of the collection on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A row carried a category label the engine does not recognise.
    #[error("row {id} in {path} has unknown amenity category '{value}'")]
    UnknownCategory {
        /// Identifier of the offending row.
        id: i64,
        /// The rejected label.
        value: String,
        /// Location of the collection on disk.
        path: PathBuf,
    },
}

/// Which of the two collections a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    /// Point-located amenities; the schema has no `brand` column.
    Point,
    /// Polygon-centroid amenities, with `brand`.
    Polygon,
}

impl Collection {
    const fn select_sql(self) -> &'static str {
        match self {
            // The point schema carries no brand column.
            Self::Point => "SELECT id, cat, name, NULL AS brand, lat, lon, ",
            Self::Polygon => "SELECT id, cat, name, brand, lat, lon, ",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Polygon => "polygon",
        }
    }
}

/// Candidate source backed by the point and/or polygon-centroid collections.
///
/// Construction is the fatal-error boundary: a missing pair of collections or
/// an unreadable file surfaces here, before any query executes. Scans
/// afterwards are infallible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqliteAmenitySource {
    by_category: BTreeMap<Category, Vec<AmenityRecord>>,
}

impl SqliteAmenitySource {
    /// Open the provided collections and bulk-load their rows.
    ///
    /// Pass `None` for a collection that does not exist for this deployment;
    /// passing `None` for both is [`AmenitySourceError::NoCollections`].
    ///
    /// # Errors
    /// Returns [`AmenitySourceError`] when no collection is provided, a file
    /// cannot be opened read-only, a read fails, or a row carries an unknown
    /// category label.
    pub fn open(
        points: Option<&Path>,
        polygons: Option<&Path>,
    ) -> Result<Self, AmenitySourceError> {
        if points.is_none() && polygons.is_none() {
            return Err(AmenitySourceError::NoCollections);
        }

        let mut by_category = BTreeMap::new();
        if let Some(path) = points {
            load_collection(path, Collection::Point, &mut by_category)?;
        }
        if let Some(path) = polygons {
            load_collection(path, Collection::Polygon, &mut by_category)?;
        }

        let total: usize = by_category.values().map(Vec::len).sum();
        log::info!(
            "loaded {total} amenity records across {} categories",
            by_category.len()
        );
        Ok(Self { by_category })
    }

    /// Total number of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    /// Whether no records were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.values().all(Vec::is_empty)
    }
}

impl CandidateSource for SqliteAmenitySource {
    fn scan(&self, category: Category) -> Box<dyn Iterator<Item = AmenityRecord> + Send + '_> {
        match self.by_category.get(&category) {
            Some(records) => Box::new(records.iter().cloned()),
            None => Box::new(std::iter::empty()),
        }
    }
}

/// One decoded row, before category validation.
struct RawRow {
    id: i64,
    category: String,
    name: Option<String>,
    brand: Option<String>,
    location: Coord<f64>,
    tags: AmenityTags,
}

fn load_collection(
    path: &Path,
    collection: Collection,
    by_category: &mut BTreeMap<Category, Vec<AmenityRecord>>,
) -> Result<(), AmenitySourceError> {
    let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|source| AmenitySourceError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        })?;

    let sql = format!("{}{TAG_COLUMNS} FROM amenities", collection.select_sql());
    let mut statement =
        connection
            .prepare(&sql)
            .map_err(|source| AmenitySourceError::Query {
                operation: "prepare amenity selection",
                path: path.to_path_buf(),
                source,
            })?;

    let rows = statement
        .query_map([], |row| {
            Ok(RawRow {
                id: row.get(0)?,
                category: row.get(1)?,
                name: row.get(2)?,
                brand: row.get(3)?,
                location: Coord {
                    x: row.get(5)?,
                    y: row.get(4)?,
                },
                tags: AmenityTags {
                    amenity: row.get(6)?,
                    shop: row.get(7)?,
                    healthcare: row.get(8)?,
                    railway: row.get(9)?,
                    highway: row.get(10)?,
                    public_transport: row.get(11)?,
                    leisure: row.get(12)?,
                    boundary: row.get(13)?,
                    landuse: row.get(14)?,
                    sport: row.get(15)?,
                    school_level: row.get(16)?,
                    isced_level: row.get(17)?,
                },
            })
        })
        .map_err(|source| AmenitySourceError::Query {
            operation: "query amenities",
            path: path.to_path_buf(),
            source,
        })?;

    let mut loaded = 0_usize;
    for row in rows {
        let raw = row.map_err(|source| AmenitySourceError::Query {
            operation: "read amenity row",
            path: path.to_path_buf(),
            source,
        })?;
        let category: Category =
            raw.category
                .parse()
                .map_err(|_| AmenitySourceError::UnknownCategory {
                    id: raw.id,
                    value: raw.category.clone(),
                    path: path.to_path_buf(),
                })?;
        by_category.entry(category).or_default().push(AmenityRecord {
            id: raw.id,
            category,
            name: raw.name,
            brand: raw.brand,
            location: raw.location,
            tags: raw.tags,
        });
        loaded += 1;
    }

    log::debug!(
        "loaded {loaded} records from the {} collection at {}",
        collection.label(),
        path.display()
    );
    Ok(())
}
