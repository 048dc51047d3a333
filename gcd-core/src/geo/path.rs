use super::{GeoError, GeodesicSolution, GeodesicSolver, Location};
use crate::{
    defaults::{DEFAULT_SEGMENT_STEP, MAX_PATH_POINTS},
    measure::Distance,
};
use anyhow::{Context as _, bail};
use std::{fmt, ops::Deref, str::FromStr};

/// How to subdivide a geodesic into discrete points.
///
/// # Parsing and display
///
/// A bare integer is a segment count, a distance is a step:
///
/// ```
/// use gcd_core::geo::Sampling;
///
/// assert_eq!("16".parse::<Sampling>().unwrap(), Sampling::Count(16));
/// assert_eq!(
///     "1000km".parse::<Sampling>().unwrap().to_string(),
///     "1000km"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// `n` segments of equal length, `n + 1` points.
    Count(usize),
    /// one point every `step` from the start, then the end point.
    Step(Distance),
}

impl Default for Sampling {
    fn default() -> Self {
        Self::Step(DEFAULT_SEGMENT_STEP)
    }
}

impl fmt::Display for Sampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => fmt::Display::fmt(count, f),
            Self::Step(step) => fmt::Display::fmt(step, f),
        }
    }
}

impl FromStr for Sampling {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            bail!("Failed to parse Sampling: empty")
        }

        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let count = trimmed
                .parse()
                .with_context(|| format!("Failed to parse Sampling count `{trimmed}`"))?;
            Ok(Self::Count(count))
        } else {
            let step = trimmed
                .parse()
                .with_context(|| format!("Failed to parse Sampling step `{trimmed}`"))?;
            Ok(Self::Step(step))
        }
    }
}

/// Ordered locations along a geodesic, from start to end.
///
/// Never empty: the first location is the start and the last one the end
/// of the sampled geodesic.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSample(Vec<Location>);

impl PathSample {
    pub fn start(&self) -> Location {
        self.0[0]
    }

    pub fn end(&self) -> Location {
        self.0[self.0.len() - 1]
    }

    pub fn into_inner(self) -> Vec<Location> {
        self.0
    }
}

impl Deref for PathSample {
    type Target = [Location];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for PathSample {
    type Item = Location;
    type IntoIter = std::vec::IntoIter<Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathSample {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub(super) fn sample<S>(
    solver: &S,
    solution: &GeodesicSolution,
    sampling: Sampling,
) -> Result<PathSample, GeoError>
where
    S: GeodesicSolver + ?Sized,
{
    let points = match sampling {
        Sampling::Count(count) => by_count(solver, solution, count)?,
        Sampling::Step(step) => by_step(solver, solution, step)?,
    };

    log::trace!(
        "sampled {} points between {} and {} ({sampling})",
        points.len(),
        solution.start(),
        solution.end(),
    );

    Ok(PathSample(points))
}

fn by_count<S>(
    solver: &S,
    solution: &GeodesicSolution,
    count: usize,
) -> Result<Vec<Location>, GeoError>
where
    S: GeodesicSolver + ?Sized,
{
    if count == 0 {
        return Err(GeoError::InvalidSampleCount { count });
    }
    let expected = within_limit(count.saturating_add(1))?;

    let start = solution.start();
    if solution.distance() == Distance::ZERO {
        // same place, possibly spelled differently: keep the requested end
        let mut points = vec![start; count];
        points.push(solution.end());
        return Ok(points);
    }

    let total = solution.distance().as_meters();
    let mut points = Vec::with_capacity(expected);
    points.push(start);
    for i in 1..count {
        let s = total * (i as f64) / (count as f64);
        points.push(walk(solver, solution, s)?);
    }
    points.push(solution.end());

    Ok(points)
}

fn by_step<S>(
    solver: &S,
    solution: &GeodesicSolution,
    step: Distance,
) -> Result<Vec<Location>, GeoError>
where
    S: GeodesicSolver + ?Sized,
{
    let step = step.as_meters();
    if step <= 0.0 {
        return Err(GeoError::InvalidSampleStep { value: step });
    }

    let total = solution.distance().as_meters();
    // `as` saturates, an infinite ratio lands on usize::MAX
    let expected = within_limit(((total / step).ceil().max(1.0) + 1.0) as usize)?;
    let mut points = Vec::with_capacity(expected);
    points.push(solution.start());

    // positions are `step * i`, never accumulated
    let mut i = 1_u64;
    loop {
        let s = step * (i as f64);
        if s >= total {
            break;
        }
        points.push(walk(solver, solution, s)?);
        i += 1;
    }
    points.push(solution.end());

    Ok(points)
}

fn within_limit(count: usize) -> Result<usize, GeoError> {
    if count > MAX_PATH_POINTS {
        return Err(GeoError::TooManySamples {
            count,
            max: MAX_PATH_POINTS,
        });
    }
    Ok(count)
}

fn walk<S>(solver: &S, solution: &GeodesicSolution, s: f64) -> Result<Location, GeoError>
where
    S: GeodesicSolver + ?Sized,
{
    let distance = Distance::from_meters(s).ok_or(GeoError::NonFiniteComputation)?;
    solver.position(solution.start(), solution.initial_azimuth(), distance)
}
