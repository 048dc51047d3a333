//! Free text place name to coordinates.
//!
//! The [`Geocoder`] trait is the seam between the presentation layer and a
//! remote lookup service. [`Nominatim`] talks to any service implementing
//! the Nominatim `/search` API.
//!
//! "Not found" and "timed out" are ordinary outcomes and come back as an
//! empty list; everything else is a [`GeocodeError`].

mod nominatim;

pub use self::nominatim::{Nominatim, NominatimBuilder};

use crate::geo::Location;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("invalid geocoding endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("geocoding result limit must be within [1, {max}], got {limit}", max = crate::defaults::MAX_GEOCODE_RESULTS)]
    InvalidLimit { limit: usize },
    #[error("failed to set up the geocoding client")]
    Client(#[source] reqwest::Error),
    #[error("geocoding request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("geocoding service answered with HTTP status {status}")]
    Status { status: u16 },
    #[error("geocoding service returned an unreadable payload: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("geocoding service returned an invalid coordinate for `{display_name}`: {reason}")]
    InvalidCoordinate {
        display_name: String,
        reason: String,
    },
}

/// One candidate for a geocoding query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    display_name: String,
    location: Location,
}

impl GeocodeResult {
    pub fn new(display_name: impl Into<String>, location: Location) -> Self {
        Self {
            display_name: display_name.into(),
            location,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

impl fmt::Display for GeocodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4})", self.display_name, self.location)
    }
}

pub trait Geocoder {
    /// Look up `query`, returning at most a handful of candidates.
    ///
    /// An empty list means nothing was found (or the lookup timed out).
    fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, GeocodeError>;
}

impl<G> Geocoder for &G
where
    G: Geocoder + ?Sized,
{
    fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
        (**self).geocode(query)
    }
}

impl<G> Geocoder for Box<G>
where
    G: Geocoder + ?Sized,
{
    fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
        (**self).geocode(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_display() {
        let result = GeocodeResult::new(
            "Jakarta, Indonesia",
            Location::from_degrees(-6.1754, 106.8272).unwrap(),
        );

        assert_eq!(
            result.to_string(),
            "Jakarta, Indonesia (-6.1754°, 106.8272°)"
        );
    }

    #[test]
    fn error_messages_are_user_readable() {
        assert_eq!(
            GeocodeError::Status { status: 503 }.to_string(),
            "geocoding service answered with HTTP status 503"
        );
        assert_eq!(
            GeocodeError::InvalidLimit { limit: 9 }.to_string(),
            "geocoding result limit must be within [1, 5], got 9"
        );
    }
}
