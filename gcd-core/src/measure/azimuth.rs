use crate::{
    defaults::DEFAULT_PRECISION,
    geo::{DEGREE_SUFFIX, GeoError, parse_degrees},
};
use anyhow::anyhow;
use std::{fmt, str::FromStr};

/// Compass bearing in degrees, clockwise from north, normalized to `[0, 360)`.
///
/// ```
/// # use gcd_core::measure::Azimuth;
/// let west = Azimuth::from_degrees(-90.0).unwrap();
/// assert_eq!(west.as_degrees(), 270.0);
/// assert_eq!(west.to_string(), "270.00000°");
/// assert_eq!(west.reverse().as_degrees(), 90.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Azimuth(f64);

impl Azimuth {
    pub const NORTH: Self = Self(0.0);

    /// Creates an azimuth from any finite angle in degrees.
    pub fn from_degrees(degrees: f64) -> Result<Self, GeoError> {
        if !degrees.is_finite() {
            return Err(GeoError::NonFiniteComputation);
        }

        // `+ 0.0` turns `-0.0` into `0.0`
        let normalized = degrees.rem_euclid(360.0) + 0.0;
        // rem_euclid rounds tiny negative angles up to exactly 360.0
        if normalized >= 360.0 {
            Ok(Self(0.0))
        } else {
            Ok(Self(normalized))
        }
    }

    pub const fn as_degrees(self) -> f64 {
        self.0
    }

    /// The opposite bearing.
    pub fn reverse(self) -> Self {
        let reversed = self.0 + 180.0;
        if reversed >= 360.0 {
            Self(reversed - 360.0)
        } else {
            Self(reversed)
        }
    }
}

impl fmt::Display for Azimuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);
        write!(f, "{:.*}{DEGREE_SUFFIX}", precision, self.0)
    }
}

impl FromStr for Azimuth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees = parse_degrees(s)?;
        Self::from_degrees(degrees).map_err(|error| anyhow!("Failed to parse Azimuth: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_into_range() {
        assert_eq!(Azimuth::from_degrees(0.0).unwrap().as_degrees(), 0.0);
        assert_eq!(Azimuth::from_degrees(360.0).unwrap().as_degrees(), 0.0);
        assert_eq!(Azimuth::from_degrees(-180.0).unwrap().as_degrees(), 180.0);
        assert_eq!(Azimuth::from_degrees(725.0).unwrap().as_degrees(), 5.0);
        assert_eq!(Azimuth::from_degrees(-1e-20).unwrap().as_degrees(), 0.0);
        assert_eq!(Azimuth::from_degrees(-0.0).unwrap().to_string(), "0.00000°");
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(
            Azimuth::from_degrees(f64::NAN).unwrap_err(),
            GeoError::NonFiniteComputation
        );
    }

    #[test]
    fn reverse_stays_in_range() {
        assert_eq!(Azimuth::NORTH.reverse().as_degrees(), 180.0);
        assert_eq!(
            Azimuth::from_degrees(180.0).unwrap().reverse().as_degrees(),
            0.0
        );
        assert_eq!(
            Azimuth::from_degrees(350.0).unwrap().reverse().as_degrees(),
            170.0
        );
    }

    #[test]
    fn display_uses_default_precision() {
        let azimuth = Azimuth::from_degrees(12.3).unwrap();

        assert_eq!(
            azimuth.to_string(),
            format!("{:.*}°", DEFAULT_PRECISION, 12.3)
        );
        assert_eq!(format!("{azimuth:.1}"), "12.3°");
    }

    #[test]
    fn display_and_parse() {
        let azimuth: Azimuth = "345.5°".parse().unwrap();
        assert_eq!(azimuth.as_degrees(), 345.5);
        assert_eq!(format!("{azimuth:.1}"), "345.5\u{00B0}");
        assert_eq!("-15".parse::<Azimuth>().unwrap().as_degrees(), 345.0);
        assert!("north".parse::<Azimuth>().is_err());
    }
}
