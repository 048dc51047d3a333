use anyhow::{anyhow, bail, ensure};
use core::fmt;
use logos::Logos;
use std::{str::FromStr, time};

/// Human readable [`std::time::Duration`], used for timeouts.
///
/// ```
/// # use gcd_core::time::Duration;
/// let timeout: Duration = "1s 500ms".parse().unwrap();
/// assert_eq!(timeout.into_duration().as_millis(), 1_500);
/// assert_eq!(timeout.to_string(), "1.5s");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(time::Duration);

impl Duration {
    pub const fn new(dur: time::Duration) -> Self {
        Self(dur)
    }

    #[inline]
    pub fn into_duration(self) -> time::Duration {
        self.0
    }
}

impl From<time::Duration> for Duration {
    fn from(value: time::Duration) -> Self {
        Self::new(value)
    }
}

impl From<Duration> for time::Duration {
    fn from(value: Duration) -> Self {
        value.into_duration()
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <time::Duration as fmt::Debug>::fmt(&self.0, f)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <time::Duration as fmt::Debug>::fmt(&self.0, f)
    }
}

impl FromStr for Duration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lex = Part::lexer(s);
        let mut total = time::Duration::ZERO;
        let mut parts = 0_usize;

        while let Some(part) = lex.next() {
            let Ok(Part::Amount) = part else {
                bail!("Expecting an amount at `{}` in duration `{s}`", lex.slice())
            };
            let amount: f64 = lex.slice().parse()?;

            let unit = match lex.next() {
                Some(Ok(Part::Unit(unit))) => unit,
                Some(Ok(Part::Amount)) | None => bail!("Missing unit after `{amount}` in `{s}`"),
                Some(Err(())) => bail!("Unknown unit `{}` in duration `{s}`", lex.slice()),
            };

            total += time::Duration::try_from_secs_f64(unit.to_seconds(amount))
                .map_err(|error| anyhow!("Invalid duration `{s}`: {error}"))?;
            parts += 1;
        }

        ensure!(parts > 0, "cannot parse a duration from `{s}`");

        Ok(Self(total))
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\f]+")]
enum Part {
    #[token("ms", |_| Unit::Millis)]
    #[token("s", |_| Unit::Secs)]
    #[token("m", |_| Unit::Mins)]
    #[token("h", |_| Unit::Hours)]
    Unit(Unit),

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Millis,
    Secs,
    Mins,
    Hours,
}

impl Unit {
    fn to_seconds(self, amount: f64) -> f64 {
        match self {
            Self::Millis => amount / 1_000.0,
            Self::Secs => amount,
            Self::Mins => amount * 60.0,
            Self::Hours => amount * 3_600.0,
        }
    }
}
