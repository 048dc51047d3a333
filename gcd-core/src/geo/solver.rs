use super::{GeoError, Location, PathSample, Sampling, path};
use crate::measure::{Azimuth, Distance};
use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};

/// Spheroid parameter
///
/// for earth, use [`Spheroid::WGS84`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spheroid {
    /// Semi Major Axis in meter / Radius at equator
    semi_major_axis: f64,
    /// flattening `(a - b) / a`
    flattening: f64,
}

impl Spheroid {
    /// WGS-84 geocentric datum parameters
    pub const WGS84: Self = Self::new(6_378_137.0, 1.0 / 298.257_223_563);
    /// GRS-80, differs from WGS-84 in the 11th digit of the flattening
    pub const GRS80: Self = Self::new(6_378_137.0, 1.0 / 298.257_222_101);

    pub const fn new(semi_major_axis: f64, flattening: f64) -> Self {
        Self {
            semi_major_axis,
            flattening,
        }
    }

    pub const fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub const fn flattening(&self) -> f64 {
        self.flattening
    }

    /// Semi minor axis in meter / Radius at pole
    pub const fn semi_minor_axis(&self) -> f64 {
        (1.0 - self.flattening) * self.semi_major_axis
    }
}

impl Default for Spheroid {
    fn default() -> Self {
        Self::WGS84
    }
}

/// Result of the inverse geodesic problem between two [`Location`]s.
///
/// Recomputed for every request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicSolution {
    start: Location,
    end: Location,
    distance: Distance,
    initial_azimuth: Azimuth,
    final_azimuth: Azimuth,
    arc_length: f64,
}

impl GeodesicSolution {
    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    /// Length of the geodesic along the ellipsoid.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Bearing leaving `start` toward `end`.
    pub fn initial_azimuth(&self) -> Azimuth {
        self.initial_azimuth
    }

    /// Bearing of travel when arriving at `end`.
    pub fn final_azimuth(&self) -> Azimuth {
        self.final_azimuth
    }

    /// Bearing leaving `end` back toward `start` along the same geodesic.
    ///
    /// ```
    /// # use gcd_core::geo::{GeodesicSolver, KarneySolver, Location};
    /// let a = Location::from_degrees(0.0, 0.0).unwrap();
    /// let b = Location::from_degrees(0.0, 10.0).unwrap();
    ///
    /// let solution = KarneySolver::default().solve(a, b).unwrap();
    /// assert_eq!(solution.initial_azimuth().as_degrees(), 90.0);
    /// assert_eq!(solution.back_azimuth().as_degrees(), 270.0);
    /// ```
    pub fn back_azimuth(&self) -> Azimuth {
        self.final_azimuth.reverse()
    }

    /// Arc length on the auxiliary sphere, in degrees.
    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }
}

/// Distance, azimuths and path between two locations.
///
/// Implementors provide the inverse and direct solutions of the geodesic
/// problem; everything else is derived from those two.
pub trait GeodesicSolver {
    /// Solve the inverse problem between `start` and `end`.
    fn solve(&self, start: Location, end: Location) -> Result<GeodesicSolution, GeoError>;

    /// Solve the direct problem: the location reached after travelling
    /// `distance` from `start` with the initial bearing `azimuth`.
    fn position(
        &self,
        start: Location,
        azimuth: Azimuth,
        distance: Distance,
    ) -> Result<Location, GeoError>;

    /// Surface distance between `a` and `b`.
    fn distance(&self, a: Location, b: Location) -> Result<Distance, GeoError> {
        self.solve(a, b).map(|solution| solution.distance())
    }

    /// `(initial, final)` bearings of the geodesic from `a` to `b`.
    ///
    /// Coincident and antipodal pairs get whatever the solver natively
    /// returns.
    fn azimuths(&self, a: Location, b: Location) -> Result<(Azimuth, Azimuth), GeoError> {
        self.solve(a, b)
            .map(|solution| (solution.initial_azimuth(), solution.final_azimuth()))
    }

    /// `n + 1` locations from `a` to `b`, evenly spaced by arc length.
    fn sample_path(&self, a: Location, b: Location, n: usize) -> Result<PathSample, GeoError> {
        self.sample(a, b, Sampling::Count(n))
    }

    /// Sample the geodesic from `a` to `b` with the given strategy.
    fn sample(&self, a: Location, b: Location, sampling: Sampling) -> Result<PathSample, GeoError> {
        let solution = self.solve(a, b)?;
        self.sample_solution(&solution, sampling)
    }

    /// Sample an already solved geodesic, only the direct problem is solved.
    fn sample_solution(
        &self,
        solution: &GeodesicSolution,
        sampling: Sampling,
    ) -> Result<PathSample, GeoError> {
        path::sample(self, solution, sampling)
    }

    /// Location halfway along an already solved geodesic.
    fn midpoint(&self, solution: &GeodesicSolution) -> Result<Location, GeoError> {
        let half = Distance::from_meters(solution.distance().as_meters() / 2.0)
            .ok_or(GeoError::NonFiniteComputation)?;
        self.position(solution.start(), solution.initial_azimuth(), half)
    }
}

/// Karney's geodesic algorithms, via GeographicLib.
///
/// Accurate to round-off for any pair of points, including nearly
/// antipodal ones.
#[derive(Debug, Clone, Copy)]
pub struct KarneySolver {
    spheroid: Spheroid,
    geodesic: Geodesic,
}

impl KarneySolver {
    pub fn new(spheroid: Spheroid) -> Self {
        Self {
            spheroid,
            geodesic: Geodesic::new(spheroid.semi_major_axis(), spheroid.flattening()),
        }
    }

    pub fn spheroid(&self) -> Spheroid {
        self.spheroid
    }
}

impl Default for KarneySolver {
    fn default() -> Self {
        Self::new(Spheroid::WGS84)
    }
}

impl GeodesicSolver for KarneySolver {
    fn solve(&self, start: Location, end: Location) -> Result<GeodesicSolution, GeoError> {
        let (lat1, lon1) = start.to_degrees();
        let (lat2, lon2) = end.to_degrees();

        let (s12, azi1, azi2, a12): (f64, f64, f64, f64) =
            self.geodesic.inverse(lat1, lon1, lat2, lon2);

        if !a12.is_finite() {
            return Err(GeoError::NonFiniteComputation);
        }

        Ok(GeodesicSolution {
            start,
            end,
            distance: Distance::from_meters(s12).ok_or(GeoError::NonFiniteComputation)?,
            initial_azimuth: Azimuth::from_degrees(azi1)?,
            final_azimuth: Azimuth::from_degrees(azi2)?,
            arc_length: a12,
        })
    }

    fn position(
        &self,
        start: Location,
        azimuth: Azimuth,
        distance: Distance,
    ) -> Result<Location, GeoError> {
        let (lat1, lon1) = start.to_degrees();

        let (lat2, lon2): (f64, f64) =
            self.geodesic
                .direct(lat1, lon1, azimuth.as_degrees(), distance.as_meters());

        Location::from_degrees(lat2, lon2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn jakarta() -> Location {
        Location::from_degrees(6.20889, 106.82750).unwrap()
    }

    fn qinghai() -> Location {
        Location::from_degrees(35.5, 100.0).unwrap()
    }

    fn random_location(rng: &mut StdRng) -> Location {
        Location::from_degrees(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))
            .unwrap()
    }

    #[test]
    fn distance_to_self_is_zero() {
        let solver = KarneySolver::default();
        let mut rng = StdRng::seed_from_u64(0x6cd);

        for _ in 0..256 {
            let a = random_location(&mut rng);
            assert_eq!(solver.distance(a, a).unwrap(), Distance::ZERO, "{a}");
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let solver = KarneySolver::default();
        let mut rng = StdRng::seed_from_u64(0x6cd);

        for _ in 0..256 {
            let a = random_location(&mut rng);
            let b = random_location(&mut rng);

            let forward = solver.distance(a, b).unwrap().as_meters();
            let backward = solver.distance(b, a).unwrap().as_meters();
            assert!((forward - backward).abs() < 1e-6, "{a} -> {b}");
        }
    }

    #[test]
    fn fixture_matches_geographiclib() {
        let solver = KarneySolver::default();
        let distance = solver.distance(jakarta(), qinghai()).unwrap();

        let oracle: f64 = Geodesic::wgs84().inverse(6.20889, 106.82750, 35.5, 100.0);

        assert!((distance.as_meters() - oracle).abs() < 1e-6);
        assert!(distance.as_kilometers() > 3_200.0);
        assert!(distance.as_kilometers() < 3_500.0);
    }

    #[test]
    fn fixture_azimuths() {
        let solver = KarneySolver::default();
        let (initial, final_) = solver.azimuths(jakarta(), qinghai()).unwrap();

        let (_, azi1, azi2, _): (f64, f64, f64, f64) =
            Geodesic::wgs84().inverse(6.20889, 106.82750, 35.5, 100.0);

        // heading north, slightly west
        assert!(initial.as_degrees() > 330.0 && initial.as_degrees() < 360.0);
        assert!((initial.as_degrees() - azi1.rem_euclid(360.0)).abs() < 1e-9);
        assert!((final_.as_degrees() - azi2.rem_euclid(360.0)).abs() < 1e-9);
    }

    #[test]
    fn azimuths_are_normalized() {
        let solver = KarneySolver::default();
        let mut rng = StdRng::seed_from_u64(0x6cd);

        for _ in 0..256 {
            let a = random_location(&mut rng);
            let b = random_location(&mut rng);

            let (initial, final_) = solver.azimuths(a, b).unwrap();
            assert!((0.0..360.0).contains(&initial.as_degrees()), "{a} -> {b}");
            assert!((0.0..360.0).contains(&final_.as_degrees()), "{a} -> {b}");
        }
    }

    #[test]
    fn cardinal_directions() {
        let solver = KarneySolver::default();
        let origin = Location::from_degrees(0.0, 0.0).unwrap();
        let north = Location::from_degrees(10.0, 0.0).unwrap();
        let west = Location::from_degrees(0.0, -10.0).unwrap();

        let (initial, final_) = solver.azimuths(origin, north).unwrap();
        assert_eq!(initial.as_degrees(), 0.0);
        assert_eq!(final_.as_degrees(), 0.0);

        let (initial, final_) = solver.azimuths(origin, west).unwrap();
        assert_eq!(initial.as_degrees(), 270.0);
        assert_eq!(final_.as_degrees(), 270.0);
    }

    #[test]
    fn handles_antipodal_points() {
        let solver = KarneySolver::default();
        let p1 = Location::from_degrees(0.0, 0.0).unwrap();
        let p2 = Location::from_degrees(0.0, 180.0).unwrap();

        let distance = solver.distance(p1, p2).unwrap();
        assert!((distance.as_meters() - 20_003_931.0).abs() < 1.0);
    }

    #[test]
    fn position_walks_the_geodesic() {
        let solver = KarneySolver::default();
        let solution = solver.solve(jakarta(), qinghai()).unwrap();

        let reached = solver
            .position(
                solution.start(),
                solution.initial_azimuth(),
                solution.distance(),
            )
            .unwrap();

        assert!(solver.distance(reached, qinghai()).unwrap().as_meters() < 1e-3);
    }

    #[test]
    fn back_azimuth_is_reverse_of_final() {
        let solution = KarneySolver::default()
            .solve(jakarta(), qinghai())
            .unwrap();

        let expected = (solution.final_azimuth().as_degrees() + 180.0) % 360.0;
        assert!((solution.back_azimuth().as_degrees() - expected).abs() < 1e-9);
    }

    #[test]
    fn arc_length_of_quarter_meridian() {
        let solution = KarneySolver::default()
            .solve(
                Location::from_degrees(0.0, 0.0).unwrap(),
                Location::from_degrees(90.0, 0.0).unwrap(),
            )
            .unwrap();

        assert!((solution.arc_length() - 90.0).abs() < 1e-6);
        assert!((solution.distance().as_meters() - 10_001_965.729).abs() < 1e-2);
    }

    #[test]
    fn grs80_is_close_to_wgs84() {
        let wgs84 = KarneySolver::new(Spheroid::WGS84);
        let grs80 = KarneySolver::new(Spheroid::GRS80);

        let a = wgs84.distance(jakarta(), qinghai()).unwrap().as_meters();
        let b = grs80.distance(jakarta(), qinghai()).unwrap().as_meters();

        assert!((a - b).abs() < 1e-2);
        assert_eq!(grs80.spheroid(), Spheroid::GRS80);
    }

    /// counts the inverse solutions it is asked for
    struct Counting {
        inner: KarneySolver,
        solved: std::cell::Cell<usize>,
    }

    impl GeodesicSolver for Counting {
        fn solve(&self, start: Location, end: Location) -> Result<GeodesicSolution, GeoError> {
            self.solved.set(self.solved.get() + 1);
            self.inner.solve(start, end)
        }

        fn position(
            &self,
            start: Location,
            azimuth: Azimuth,
            distance: Distance,
        ) -> Result<Location, GeoError> {
            self.inner.position(start, azimuth, distance)
        }
    }

    #[test]
    fn solved_geodesic_is_reused() {
        let solver = Counting {
            inner: KarneySolver::default(),
            solved: std::cell::Cell::new(0),
        };

        let solution = solver.solve(jakarta(), qinghai()).unwrap();
        let path = solver
            .sample_solution(&solution, Sampling::Count(8))
            .unwrap();
        let center = solver.midpoint(&solution).unwrap();

        assert_eq!(solver.solved.get(), 1);
        assert_eq!(path, solver.inner.sample_path(jakarta(), qinghai(), 8).unwrap());
        assert_eq!(path[4], center);
    }

    #[test]
    fn midpoint_is_halfway() {
        let solver = KarneySolver::default();
        let solution = solver.solve(jakarta(), qinghai()).unwrap();

        let center = solver.midpoint(&solution).unwrap();

        let to_start = solver.distance(jakarta(), center).unwrap().as_meters();
        let to_end = solver.distance(center, qinghai()).unwrap().as_meters();
        assert!((to_start - to_end).abs() < 1e-3);

        let same = solver.solve(jakarta(), jakarta()).unwrap();
        let center = solver.midpoint(&same).unwrap();
        assert!(solver.distance(center, jakarta()).unwrap().as_meters() < 1e-6);
    }

    #[test]
    fn spheroid_minor_axis() {
        let b = Spheroid::WGS84.semi_minor_axis();
        assert!((b - 6_356_752.314_245).abs() < 1e-6);
    }
}
