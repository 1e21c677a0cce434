//! Behaviour of the SQLite-backed candidate source against real collection
//! files built in a temporary directory.
#![cfg(feature = "source-sqlite")]

use std::path::{Path, PathBuf};

use geo::Coord;
use nearscore_core::{
    AmenitySourceError, CandidateSource, Category, QueryEngine, QueryRequest, SqliteAmenitySource,
};
use rstest::rstest;
use rusqlite::{Connection, params};
use tempfile::TempDir;

const ORIGIN: Coord<f64> = Coord { x: 4.3517, y: 50.8466 };

/// A row to insert, covering only the columns the tests care about.
struct Row {
    id: i64,
    cat: &'static str,
    name: Option<&'static str>,
    brand: Option<&'static str>,
    location: Coord<f64>,
    amenity: Option<&'static str>,
    shop: Option<&'static str>,
    railway: Option<&'static str>,
}

impl Row {
    fn new(id: i64, cat: &'static str, location: Coord<f64>) -> Self {
        Self {
            id,
            cat,
            name: None,
            brand: None,
            location,
            amenity: None,
            shop: None,
            railway: None,
        }
    }
}

fn tag_column_ddl() -> &'static str {
    "amenity TEXT, shop TEXT, healthcare TEXT, railway TEXT, highway TEXT, \
     public_transport TEXT, leisure TEXT, boundary TEXT, landuse TEXT, sport TEXT, \
     school_level TEXT, isced_level TEXT"
}

fn create_collection(dir: &Path, file: &str, with_brand: bool, rows: &[Row]) -> PathBuf {
    let path = dir.join(file);
    let connection = Connection::open(&path).expect("create collection database");
    let brand_column = if with_brand { "brand TEXT," } else { "" };
    connection
        .execute_batch(&format!(
            "CREATE TABLE amenities (
                id INTEGER PRIMARY KEY,
                cat TEXT NOT NULL,
                name TEXT,
                {brand_column}
                lat REAL NOT NULL,
                lon REAL NOT NULL,
                {tags}
            );",
            tags = tag_column_ddl()
        ))
        .expect("create amenities table");
    for row in rows {
        if with_brand {
            connection
                .execute(
                    "INSERT INTO amenities (id, cat, name, brand, lat, lon, amenity, shop, railway)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        row.id,
                        row.cat,
                        row.name,
                        row.brand,
                        row.location.y,
                        row.location.x,
                        row.amenity,
                        row.shop,
                        row.railway,
                    ],
                )
                .expect("insert polygon row");
        } else {
            connection
                .execute(
                    "INSERT INTO amenities (id, cat, name, lat, lon, amenity, shop, railway)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        row.id,
                        row.cat,
                        row.name,
                        row.location.y,
                        row.location.x,
                        row.amenity,
                        row.shop,
                        row.railway,
                    ],
                )
                .expect("insert point row");
        }
    }
    path
}

fn near_origin(id_step: f64) -> Coord<f64> {
    Coord {
        x: ORIGIN.x + 0.001 * id_step,
        y: ORIGIN.y,
    }
}

#[rstest]
fn merges_both_collections_and_fills_missing_brand() {
    let dir = TempDir::new().expect("temporary directory");
    let points = create_collection(
        dir.path(),
        "points.db",
        false,
        &[
            {
                let mut row = Row::new(1, "market", near_origin(1.0));
                row.name = Some("Corner shop");
                row.shop = Some("convenience");
                row
            },
            {
                let mut row = Row::new(2, "transit", near_origin(2.0));
                row.railway = Some("station");
                row
            },
        ],
    );
    let polygons = create_collection(
        dir.path(),
        "polygons.db",
        true,
        &[{
            let mut row = Row::new(3, "market", near_origin(3.0));
            row.name = Some("Delhaize Centre");
            row.brand = Some("Delhaize");
            row.shop = Some("supermarket");
            row
        }],
    );

    let source =
        SqliteAmenitySource::open(Some(&points), Some(&polygons)).expect("open both collections");
    assert_eq!(source.len(), 3);

    let markets: Vec<_> = source.scan(Category::Market).collect();
    assert_eq!(markets.len(), 2);
    let point_market = markets.iter().find(|r| r.id == 1).expect("point market");
    assert_eq!(point_market.brand, None);
    assert_eq!(point_market.tags.shop.as_deref(), Some("convenience"));
    let polygon_market = markets.iter().find(|r| r.id == 3).expect("polygon market");
    assert_eq!(polygon_market.brand.as_deref(), Some("Delhaize"));

    assert_eq!(source.scan(Category::Transit).count(), 1);
    assert_eq!(source.scan(Category::Park).count(), 0);
}

#[rstest]
fn opens_with_a_single_collection() {
    let dir = TempDir::new().expect("temporary directory");
    let points = create_collection(
        dir.path(),
        "points.db",
        false,
        &[Row::new(1, "park", near_origin(1.0))],
    );

    let source = SqliteAmenitySource::open(Some(&points), None).expect("open point collection");
    assert_eq!(source.len(), 1);
    assert!(!source.is_empty());
    assert_eq!(source.scan(Category::Park).count(), 1);
}

#[rstest]
fn requires_at_least_one_collection() {
    let error = SqliteAmenitySource::open(None, None).expect_err("no collections must fail");
    assert!(matches!(error, AmenitySourceError::NoCollections));
}

#[rstest]
fn reports_an_unreadable_collection() {
    let dir = TempDir::new().expect("temporary directory");
    let missing = dir.path().join("absent.db");
    let error =
        SqliteAmenitySource::open(Some(&missing), None).expect_err("missing file must fail");
    assert!(matches!(error, AmenitySourceError::OpenDatabase { .. }));
}

#[rstest]
fn rejects_an_unknown_category_label() {
    let dir = TempDir::new().expect("temporary directory");
    let points = create_collection(
        dir.path(),
        "points.db",
        false,
        &[Row::new(7, "velodrome", near_origin(1.0))],
    );

    let error = SqliteAmenitySource::open(Some(&points), None).expect_err("bad label must fail");
    match error {
        AmenitySourceError::UnknownCategory { id, value, .. } => {
            assert_eq!(id, 7);
            assert_eq!(value, "velodrome");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn drives_a_full_query_over_loaded_collections() {
    let dir = TempDir::new().expect("temporary directory");
    let points = create_collection(
        dir.path(),
        "points.db",
        false,
        &[
            {
                let mut row = Row::new(1, "market", near_origin(1.0));
                row.shop = Some("supermarket");
                row
            },
            {
                let mut row = Row::new(2, "transit", near_origin(2.0));
                row.railway = Some("station");
                row
            },
        ],
    );

    let source = SqliteAmenitySource::open(Some(&points), None).expect("open point collection");
    let engine = QueryEngine::new(source);
    let request = QueryRequest::new(ORIGIN, 2_500.0, 5).expect("valid request");
    let result = engine.run(&request);

    let market = result
        .categories
        .iter()
        .find(|c| c.category == Category::Market)
        .expect("market category present");
    assert_eq!(market.n_total, 1);
    assert!(market.score > 0.0);
    assert!(result.overall_score > 0.0);
}
