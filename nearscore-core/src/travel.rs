//! Walking and driving estimates derived from great-circle distances.
//!
//! A straight-line distance is first scaled by a mode-specific circuity
//! factor, then divided by the mode's average speed. Formatting into human
//! units is a presentation concern and stays out of the engine.

use std::time::Duration;

use crate::config::TravelParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Estimated walking and driving figures for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TravelEstimate {
    /// Approximate walking distance in metres.
    pub walk_distance_m: f64,
    /// Approximate driving distance in metres.
    pub drive_distance_m: f64,
    /// Approximate walking time.
    pub walk_time: Duration,
    /// Approximate driving time.
    pub drive_time: Duration,
}

const fn kph_to_mps(kph: f64) -> f64 {
    kph * 1000.0 / 3600.0
}

impl TravelParams {
    /// Estimate walking and driving figures for a great-circle distance in
    /// metres.
    ///
    /// `distance_m` must be finite and non-negative, which holds for every
    /// distance the radius filter produces.
    #[must_use]
    pub fn estimate(&self, distance_m: f64) -> TravelEstimate {
        let walk_distance_m = distance_m * self.walk_circuity;
        let drive_distance_m = distance_m * self.drive_circuity;
        TravelEstimate {
            walk_distance_m,
            drive_distance_m,
            walk_time: Duration::from_secs_f64(walk_distance_m / kph_to_mps(self.walk_speed_kph)),
            drive_time: Duration::from_secs_f64(
                drive_distance_m / kph_to_mps(self.drive_speed_kph),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    #[rstest]
    fn one_kilometre_with_default_parameters() {
        let estimate = TravelParams::default().estimate(1_000.0);
        assert!((estimate.walk_distance_m - 1_250.0).abs() < TOLERANCE);
        assert!((estimate.drive_distance_m - 1_400.0).abs() < TOLERANCE);
        // 1250 m at 4.8 km/h is 937.5 s; 1400 m at 35 km/h is 144 s.
        assert!((estimate.walk_time.as_secs_f64() - 937.5).abs() < 1e-6);
        assert!((estimate.drive_time.as_secs_f64() - 144.0).abs() < 1e-6);
    }

    #[rstest]
    fn zero_distance_yields_zero_estimates() {
        let estimate = TravelParams::default().estimate(0.0);
        assert!(estimate.walk_distance_m.abs() < TOLERANCE);
        assert_eq!(estimate.walk_time, Duration::ZERO);
        assert_eq!(estimate.drive_time, Duration::ZERO);
    }

    #[rstest]
    fn estimates_scale_linearly_with_distance() {
        let params = TravelParams::default();
        let single = params.estimate(700.0);
        let double = params.estimate(1_400.0);
        assert!((double.walk_distance_m - 2.0 * single.walk_distance_m).abs() < TOLERANCE);
        assert!(
            (double.drive_time.as_secs_f64() - 2.0 * single.drive_time.as_secs_f64()).abs() < 1e-6
        );
    }

    #[rstest]
    fn custom_parameters_are_honoured() {
        let params = TravelParams::new(6.0, 30.0, 1.0, 1.0).expect("valid parameters");
        let estimate = params.estimate(1_000.0);
        assert!((estimate.walk_distance_m - 1_000.0).abs() < TOLERANCE);
        // 1000 m at 6 km/h is 600 s.
        assert!((estimate.walk_time.as_secs_f64() - 600.0).abs() < 1e-6);
    }
}
