use anyhow::{bail, ensure};
use logos::{Lexer, Logos};
use std::{fmt, str::FromStr};

/// Length measured along the surface of the reference ellipsoid.
///
/// Internally stored in metres. Always finite and non-negative.
///
/// # Parsing and display
///
/// ```
/// # use gcd_core::measure::Distance;
/// let step: Distance = "1000km".parse().unwrap();
/// assert_eq!(step.as_meters(), 1_000_000.0);
/// assert_eq!(step.to_string(), "1000km");
///
/// let short: Distance = "250 m".parse().unwrap();
/// assert_eq!(short.to_string(), "250m");
///
/// // an explicit precision always prints kilometres
/// assert_eq!(format!("{short:.3}"), "0.250km");
/// ```
///
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Self = Self(0.0);

    /// create a new [`Distance`] from a number of metres
    ///
    /// returns `None` if the value is negative or not finite.
    pub fn from_meters(meters: f64) -> Option<Self> {
        if meters.is_finite() && meters >= 0.0 {
            Some(Self(meters))
        } else {
            None
        }
    }

    /// create a new [`Distance`] from a number of kilometres
    ///
    /// ```
    /// # use gcd_core::measure::Distance;
    /// let d = Distance::from_kilometers(2.5).unwrap();
    /// assert_eq!(d.as_meters(), 2_500.0);
    /// ```
    pub fn from_kilometers(kilometers: f64) -> Option<Self> {
        Self::from_meters(kilometers * 1_000.0)
    }

    pub(crate) const fn from_meters_unchecked(meters: f64) -> Self {
        Self(meters)
    }

    #[inline(always)]
    pub const fn as_meters(self) -> f64 {
        self.0
    }

    #[inline(always)]
    pub fn as_kilometers(self) -> f64 {
        self.0 / 1_000.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*}km", precision, self.as_kilometers())
        } else if self.0 >= 1_000.0 {
            write!(f, "{}km", self.as_kilometers())
        } else {
            write!(f, "{}m", self.0)
        }
    }
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\n\f]+")] // Ignore this regex pattern between tokens
enum DistanceToken {
    #[token("m")]
    Meters,
    #[token("km")]
    Kilometers,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Value,
}

impl FromStr for Distance {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex = Lexer::<'_, DistanceToken>::new(s);

        let Some(Ok(DistanceToken::Value)) = lex.next() else {
            bail!("Expecting to parse a number")
        };
        let number: f64 = lex.slice().parse()?;
        let Some(Ok(token)) = lex.next() else {
            bail!("Expecting to parse a unit (m, km)")
        };
        let meters = match token {
            DistanceToken::Meters => number,
            DistanceToken::Kilometers => number * 1_000.0,
            DistanceToken::Value => bail!("Expecting to parse a unit (m, km)"),
        };

        ensure!(
            lex.next().is_none(),
            "Not expecting any other tokens to parse a distance"
        );

        match Self::from_meters(meters) {
            Some(distance) => Ok(distance),
            None => bail!("distance out of range: `{s}`"),
        }
    }
}
