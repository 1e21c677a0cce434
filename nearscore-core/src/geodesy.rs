//! Coordinate-delta and great-circle distance primitives.
//!
//! These are the only geometric operations the engine performs: converting a
//! radius in metres to degree deltas for the bounding-box prefilter, and the
//! haversine great-circle distance for the exact cutoff.

use geo::{Coord, Rect};

/// Spherical Earth radius in metres used by the haversine formula.
///
/// Fixed at 6 371 000 m to match the source datasets' distance semantics; the
/// `geo` crate's `Haversine` uses the IUGG mean radius instead.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree of latitude used by the bounding-box conversion.
pub const METRES_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// Floor applied to the latitude cosine so longitude deltas stay bounded near
/// the poles.
const MIN_LATITUDE_COSINE: f64 = 0.1;

/// Convert a radius in metres to latitude and longitude degree deltas.
///
/// The longitude delta widens with latitude; the cosine is floored at 0.1 to
/// avoid blow-up near the poles. Pure, with no failure modes.
///
/// # Examples
/// ```
/// use nearscore_core::geodesy::bounding_box_delta;
///
/// let (dlat, dlon) = bounding_box_delta(0.0, 111_320.0);
/// assert!((dlat - 1.0).abs() < 1e-12);
/// assert!((dlon - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn bounding_box_delta(latitude_deg: f64, radius_m: f64) -> (f64, f64) {
    let delta_lat = radius_m / METRES_PER_DEGREE_LATITUDE;
    let cos_lat = latitude_deg.to_radians().cos().max(MIN_LATITUDE_COSINE);
    let delta_lon = radius_m / (METRES_PER_DEGREE_LATITUDE * cos_lat);
    (delta_lat, delta_lon)
}

/// Axis-aligned lon/lat rectangle covering at least the circle of
/// `radius_m` around `origin`.
///
/// The rectangle is a cheap superset of the exact radius: it may admit points
/// slightly beyond the radius at the corners but never rejects a point within
/// it. Containment checks against the rectangle include its boundary.
#[must_use]
pub fn bounding_rect(origin: Coord<f64>, radius_m: f64) -> Rect<f64> {
    let (delta_lat, delta_lon) = bounding_box_delta(origin.y, radius_m);
    Rect::new(
        Coord {
            x: origin.x - delta_lon,
            y: origin.y - delta_lat,
        },
        Coord {
            x: origin.x + delta_lon,
            y: origin.y + delta_lat,
        },
    )
}

/// Great-circle distance between two WGS84 coordinates in metres.
///
/// Standard haversine over a sphere of radius [`EARTH_RADIUS_M`].
/// Deterministic and infallible; malformed latitudes or longitudes are the
/// caller's responsibility.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nearscore_core::geodesy::haversine_distance_m;
///
/// let brussels = Coord { x: 4.3517, y: 50.8466 };
/// let antwerp = Coord { x: 4.4024, y: 51.2194 };
/// let d = haversine_distance_m(brussels, antwerp);
/// assert!((40_000.0..43_000.0).contains(&d));
/// ```
#[must_use]
pub fn haversine_distance_m(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_dlat = (b.y - a.y).to_radians() / 2.0;
    let half_dlon = (b.x - a.x).to_radians() / 2.0;

    let h = half_dlat.sin() * half_dlat.sin()
        + lat_a.cos() * lat_b.cos() * half_dlon.sin() * half_dlon.sin();
    // Rounding can push h a hair above 1 for near-antipodal pairs.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
