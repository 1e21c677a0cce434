//! Boundary trait for the external address resolution collaborator.
//!
//! The engine itself never talks to a geocoding service; callers supply an
//! implementation (or pass coordinates directly). No retry policy lives here;
//! if the collaborator retries, it does so internally.

use geo::Coord;
use thiserror::Error;

/// A resolved address: a coordinate plus the canonical display string.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Resolved position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Canonical display form of the resolved address.
    pub display_name: String,
}

/// Errors from [`Geocoder::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The address did not resolve to any location.
    #[error("no location found for address '{address}'")]
    NoMatch {
        /// The address that failed to resolve.
        address: String,
    },
    /// The geocoding backend failed.
    #[error("geocoding backend error: {message}")]
    Backend {
        /// Backend-reported failure description.
        message: String,
    },
}

/// Map a free-text address to a coordinate and display string.
pub trait Geocoder {
    /// Resolve `address`, or fail with [`GeocodeError::NoMatch`] when the
    /// backend returns nothing.
    fn resolve(&self, address: &str) -> Result<ResolvedLocation, GeocodeError>;
}
