mod path;
mod solver;

pub use self::{
    path::{PathSample, Sampling},
    solver::{GeodesicSolution, GeodesicSolver, KarneySolver, Spheroid},
};

use crate::defaults::DEFAULT_PRECISION;
use anyhow::{Context as _, anyhow, ensure};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error(
        "latitude out of range [{min}, {max}]: {value}",
        min = Latitude::MIN,
        max = Latitude::MAX
    )]
    InvalidLatitude { value: f64 },
    #[error(
        "longitude out of range [{min}, {max}]: {value}",
        min = Longitude::MIN,
        max = Longitude::MAX
    )]
    InvalidLongitude { value: f64 },
    #[error("a path needs at least one segment, got {count}")]
    InvalidSampleCount { count: usize },
    #[error("path step must be finite and strictly positive, got {value}m")]
    InvalidSampleStep { value: f64 },
    #[error("a path of {count} points exceeds the limit of {max}")]
    TooManySamples { count: usize, max: usize },
    #[error("geo computation produced a non-finite value")]
    NonFiniteComputation,
}

macro_rules! coordinate {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, $min:literal..=$max:literal, $error:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
        pub struct $name(f64);

        impl $name {
            pub const MIN: f64 = $min;
            pub const MAX: f64 = $max;

            pub fn from_degrees(value: f64) -> Result<Self, GeoError> {
                if !value.is_finite() {
                    Err(GeoError::NonFiniteComputation)
                } else if (Self::MIN..=Self::MAX).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err(GeoError::$error { value })
                }
            }

            pub(crate) const fn new_unchecked(value: f64) -> Self {
                Self(value)
            }

            pub const fn as_degrees(self) -> f64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
                write!(f, "{:.*}{DEGREE_SUFFIX}", precision, self.0)
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let degrees = parse_degrees(s).context(concat!("Failed to parse ", $label))?;
                Self::from_degrees(degrees)
                    .map_err(|error| anyhow!("Failed to parse {}: {error}", $label))
            }
        }
    };
}

coordinate! {
    /// Latitude in decimal degrees, within `[-90, 90]`.
    ///
    /// ```
    /// use gcd_core::geo::Latitude;
    ///
    /// let latitude: Latitude = "6.20889".parse().unwrap();
    /// assert_eq!(latitude.to_string(), "6.20889°");
    /// ```
    Latitude, "Latitude", -90.0..=90.0, InvalidLatitude
}

coordinate! {
    /// Longitude in decimal degrees, within `[-180, 180]`. East is positive.
    ///
    /// ```
    /// use gcd_core::geo::Longitude;
    ///
    /// let jakarta_east: Longitude = "106.8275".parse().unwrap();
    /// let lima_west: Longitude = "-77.0428°".parse().unwrap();
    ///
    /// assert_eq!(jakarta_east.as_degrees(), 106.8275);
    /// assert_eq!(lima_west.as_degrees(), -77.0428);
    /// ```
    Longitude, "Longitude", -180.0..=180.0, InvalidLongitude
}

/// Location using validated latitude and longitude coordinates.
///
/// # Examples
///
/// ```
/// use gcd_core::geo::Location;
///
/// let jakarta = Location::from_degrees(6.20889, 106.82750).unwrap();
/// let lima = Location::from_degrees(-12.0464, -77.0428).unwrap();
///
/// assert!(jakarta.longitude.as_degrees() > 0.0);
/// assert!(lima.longitude.as_degrees() < 0.0);
///
/// let parsed: Location = "6.20889, 106.8275".parse().unwrap();
/// assert_eq!(parsed, jakarta);
/// assert_eq!(parsed.to_string(), "6.20889°, 106.82750°");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl Location {
    pub const fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        Ok(Self::new(
            Latitude::from_degrees(latitude)?,
            Longitude::from_degrees(longitude)?,
        ))
    }

    /// `(latitude, longitude)` in decimal degrees.
    pub const fn to_degrees(self) -> (f64, f64) {
        (self.latitude.as_degrees(), self.longitude.as_degrees())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(
                f,
                "{:.*}, {:.*}",
                precision, self.latitude, precision, self.longitude
            ),
            None => write!(f, "{}, {}", self.latitude, self.longitude),
        }
    }
}

impl FromStr for Location {
    type Err = anyhow::Error;

    /// `"<latitude>, <longitude>"`, degree signs optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) = s.split_once(',').with_context(|| {
            format!("Failed to parse Location `{s}`: expected format `<latitude>, <longitude>`")
        })?;
        ensure!(
            !longitude.contains(','),
            "Failed to parse Location `{s}`: expected a single comma separator"
        );

        Ok(Self::new(
            latitude
                .parse::<Latitude>()
                .context("Failed to parse Location latitude")?,
            longitude
                .parse::<Longitude>()
                .context("Failed to parse Location longitude")?,
        ))
    }
}

pub(crate) const DEGREE_SUFFIX: char = '\u{00B0}';
const ALT_DEGREE_SUFFIX: char = '\u{00BA}';

/// Parses decimal degrees with an optional `°` (or `º`) suffix.
pub(crate) fn parse_degrees(input: &str) -> anyhow::Result<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix(DEGREE_SUFFIX)
        .or_else(|| trimmed.strip_suffix(ALT_DEGREE_SUFFIX))
        .unwrap_or(trimmed)
        .trim();

    ensure!(!trimmed.is_empty(), "cannot parse from empty string");

    trimmed
        .parse::<f64>()
        .map_err(|error| anyhow!("failed to parse `{input}`: {error}"))
}
