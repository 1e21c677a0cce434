//! Radius-bounded candidate search.
//!
//! The filter runs in two stages: a cheap rectangular prefilter over raw
//! coordinates, then the exact haversine cutoff for survivors. Over large
//! collections the box test eliminates the bulk of records before any
//! trigonometry runs. The box is a strict superset of the radius, so the
//! split never loses an in-radius candidate.

use geo::{Coord, Intersects};

use crate::amenity::AmenityRecord;
use crate::geodesy::{bounding_rect, haversine_distance_m};

/// An amenity record that survived the radius filter, with its exact
/// great-circle distance from the query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The surviving record.
    pub record: AmenityRecord,
    /// Exact great-circle distance from the origin, in metres.
    pub distance_m: f64,
}

/// Return the records within `radius_m` of `origin`, with distances.
///
/// Boundary candidates are kept on both stages: a record on the bounding-box
/// edge passes the prefilter and a record at exactly `radius_m` passes the
/// cutoff.
#[must_use]
pub fn filter_within_radius<I>(records: I, origin: Coord<f64>, radius_m: f64) -> Vec<Candidate>
where
    I: IntoIterator<Item = AmenityRecord>,
{
    let bbox = bounding_rect(origin, radius_m);
    records
        .into_iter()
        .filter(|record| bbox.intersects(&record.location))
        .filter_map(|record| {
            let distance_m = haversine_distance_m(origin, record.location);
            (distance_m <= radius_m).then(|| Candidate { record, distance_m })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amenity::{AmenityTags, Category};
    use crate::geodesy::METRES_PER_DEGREE_LATITUDE;
    use rstest::rstest;

    const ORIGIN: Coord<f64> = Coord { x: 4.35, y: 50.85 };
    const RADIUS_M: f64 = 2_500.0;

    fn record(id: i64, location: Coord<f64>) -> AmenityRecord {
        AmenityRecord::new(id, Category::Market, location, AmenityTags::default())
    }

    /// Degree offset equivalent to `metres` in the box conversion metric.
    fn degrees(metres: f64) -> f64 {
        metres / METRES_PER_DEGREE_LATITUDE
    }

    #[rstest]
    #[case(Coord { x: ORIGIN.x, y: ORIGIN.y + degrees(RADIUS_M) })] // north
    #[case(Coord { x: ORIGIN.x, y: ORIGIN.y - degrees(RADIUS_M) })] // south
    fn includes_candidate_at_exactly_the_radius(#[case] location: Coord<f64>) {
        let found = filter_within_radius([record(1, location)], ORIGIN, RADIUS_M);
        assert_eq!(found.len(), 1);
    }

    #[rstest]
    #[case(Coord { x: ORIGIN.x, y: ORIGIN.y + degrees(RADIUS_M + 1.0) })]
    #[case(Coord { x: ORIGIN.x, y: ORIGIN.y - degrees(RADIUS_M + 1.0) })]
    #[case(Coord { x: ORIGIN.x + degrees(RADIUS_M) * 10.0, y: ORIGIN.y })]
    fn excludes_candidate_beyond_the_radius(#[case] location: Coord<f64>) {
        let found = filter_within_radius([record(1, location)], ORIGIN, RADIUS_M);
        assert!(found.is_empty());
    }

    #[rstest]
    fn box_corner_is_cut_by_the_exact_distance() {
        // A record at the bounding-box corner passes the prefilter but sits
        // roughly radius * sqrt(2) away, so the haversine cutoff drops it.
        let (dlat, dlon) = crate::geodesy::bounding_box_delta(ORIGIN.y, RADIUS_M);
        let corner = Coord {
            x: ORIGIN.x + dlon,
            y: ORIGIN.y + dlat,
        };
        let found = filter_within_radius([record(1, corner)], ORIGIN, RADIUS_M);
        assert!(found.is_empty());
    }

    #[rstest]
    fn attaches_exact_distances() {
        let near = record(1, Coord { x: ORIGIN.x, y: ORIGIN.y + degrees(500.0) });
        let found = filter_within_radius([near], ORIGIN, RADIUS_M);
        let candidate = found.first().expect("candidate within radius");
        assert!(candidate.distance_m > 0.0);
        assert!(candidate.distance_m <= 500.0);
    }

    #[rstest]
    fn keeps_only_in_radius_records_from_a_mixed_set() {
        let records = vec![
            record(1, ORIGIN),
            record(2, Coord { x: ORIGIN.x, y: ORIGIN.y + degrees(1_000.0) }),
            record(3, Coord { x: ORIGIN.x, y: ORIGIN.y + degrees(10_000.0) }),
        ];
        let found = filter_within_radius(records, ORIGIN, RADIUS_M);
        let ids: Vec<_> = found.iter().map(|c| c.record.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
