use crate::{
    geo::{Latitude, Location, Longitude},
    measure::Distance,
};
use std::time::Duration;

/// Default start of a request
///
/// ```
/// # use gcd_core::defaults::*;
/// assert_eq!(
///     DEFAULT_START.to_string(),
///     "6.20889°, 106.82750°"
/// );
/// ```
pub const DEFAULT_START: Location = Location::new(
    Latitude::new_unchecked(6.20889),
    Longitude::new_unchecked(106.82750),
);

/// Default end of a request
///
/// ```
/// # use gcd_core::defaults::*;
/// assert_eq!(
///     DEFAULT_END.to_string(),
///     "35.50000°, 100.00000°"
/// );
/// ```
pub const DEFAULT_END: Location = Location::new(
    Latitude::new_unchecked(35.5),
    Longitude::new_unchecked(100.0),
);

/// Default segment length when sampling a path by step
///
/// One vertex every 1000 km is enough for a map polyline to look
/// smooth at continental zoom levels.
///
/// ```
/// # use gcd_core::defaults::*;
/// assert_eq!(
///     DEFAULT_SEGMENT_STEP.to_string(),
///     "1000km"
/// );
/// ```
pub const DEFAULT_SEGMENT_STEP: Distance = Distance::from_meters_unchecked(1_000_000.0);

/// Default number of decimals used when printing coordinates, distances
/// and azimuths
pub const DEFAULT_PRECISION: usize = 5;

/// Largest number of points a sampled path may hold, endpoints included
///
/// ```
/// # use gcd_core::defaults::*;
/// # use gcd_core::geo::{GeodesicSolver, KarneySolver};
/// let solver = KarneySolver::default();
/// assert!(solver.sample_path(DEFAULT_START, DEFAULT_END, MAX_PATH_POINTS - 1).is_ok());
/// assert!(solver.sample_path(DEFAULT_START, DEFAULT_END, MAX_PATH_POINTS).is_err());
/// ```
pub const MAX_PATH_POINTS: usize = 100_000;

/// Default zoom level of the suggested map view
pub const DEFAULT_ZOOM: u8 = 3;

/// Default geocoding service endpoint
///
/// Any service answering the Nominatim `/search` API can be used instead.
pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Default `User-Agent` sent to the geocoding service
///
/// The public Nominatim instance rejects requests without an identifying
/// user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("gcd/", env!("CARGO_PKG_VERSION"));

/// Default upper bound on a geocoding round trip
///
/// ```
/// # use gcd_core::defaults::*;
/// # use std::time::Duration;
/// assert_eq!(DEFAULT_GEOCODE_TIMEOUT, Duration::from_secs(10));
/// ```
pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of candidates returned by a geocoding query
pub const MAX_GEOCODE_RESULTS: usize = 5;
