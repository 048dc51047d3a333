use gcd_core::{
    GeoError, GeocodeResult, Geocoder, GeodesicSolution, GeodesicSolver, KarneySolver, Location,
    PathSample, Sampling,
    defaults::{DEFAULT_PRECISION, DEFAULT_ZOOM},
    render::{self, View},
};
use serde_json::Value;
use std::fmt::Write as _;

/// One user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// compute distance, azimuths and path between two locations
    Solve {
        start: Location,
        end: Location,
        sampling: Sampling,
    },
    /// look a place name up
    Search { query: String },
}

/// Outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Solved(Report),
    Candidates {
        query: String,
        candidates: Vec<GeocodeResult>,
    },
    NotFound {
        query: String,
    },
    /// user-visible failure, the session goes on
    Error(String),
}

/// Everything a map widget needs to display a solved request.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    solution: GeodesicSolution,
    path: PathSample,
    view: View,
}

impl Report {
    pub fn solution(&self) -> &GeodesicSolution {
        &self.solution
    }

    pub fn path(&self) -> &PathSample {
        &self.path
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// distance and azimuths, `precision` decimals
    pub fn to_text(&self, precision: usize) -> String {
        let solution = &self.solution;
        let mut text = String::new();

        let _ = writeln!(
            text,
            "Distance between start and end: {:.*} km",
            precision,
            solution.distance().as_kilometers()
        );
        let _ = writeln!(
            text,
            "Initial azimuth: {:.*}",
            precision,
            solution.initial_azimuth()
        );
        let _ = writeln!(
            text,
            "Final azimuth: {:.*}",
            precision,
            solution.final_azimuth()
        );
        let _ = writeln!(
            text,
            "Back azimuth: {:.*}",
            precision,
            solution.back_azimuth()
        );
        let _ = write!(text, "Path: {} points", self.path.len());

        text
    }

    pub fn to_geojson(&self, precision: usize) -> Value {
        render::feature_collection(&self.solution, &self.path, self.view, precision)
    }
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn to_text(&self, precision: usize) -> String {
        match self {
            Self::Solved(report) => report.to_text(precision),
            Self::Candidates { query, candidates } => {
                let mut text = format!("Coordinates for '{query}':");
                for (index, candidate) in candidates.iter().enumerate() {
                    let location = candidate.location();
                    let _ = write!(
                        text,
                        "\n  {}. {}\n     Latitude: {:.4}, Longitude: {:.4}",
                        index + 1,
                        candidate.display_name(),
                        location.latitude,
                        location.longitude,
                    );
                }
                text
            }
            Self::NotFound { query } => format!(
                "Location '{query}' not found. Check the spelling or use a more specific place name."
            ),
            Self::Error(message) => message.clone(),
        }
    }
}

/// Request/response driver between the user, the solver and the geocoder.
///
/// Nothing is carried over from one request to the next.
#[derive(Debug, Clone)]
pub struct Session<G> {
    solver: KarneySolver,
    geocoder: G,
    zoom: u8,
}

impl<G> Session<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            solver: KarneySolver::default(),
            geocoder,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn with_solver(mut self, solver: KarneySolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Solve one request. Does not need a geocoder.
    pub fn solve(
        &self,
        start: Location,
        end: Location,
        sampling: Sampling,
    ) -> Result<Report, GeoError> {
        let solution = self.solver.solve(start, end)?;
        let path = self.solver.sample_solution(&solution, sampling)?;
        let center = self.solver.midpoint(&solution)?;

        log::info!(
            "solved {start} -> {end}: {:.3}km, {} path points",
            solution.distance().as_kilometers(),
            path.len()
        );

        Ok(Report {
            solution,
            path,
            view: View::new(center).with_zoom(self.zoom),
        })
    }
}

impl<G: Geocoder> Session<G> {
    /// Process one request to completion. Never fails: problems become
    /// [`Response::Error`].
    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Solve {
                start,
                end,
                sampling,
            } => match self.solve(start, end, sampling) {
                Ok(report) => Response::Solved(report),
                Err(error) => {
                    log::warn!("cannot solve {start} -> {end}: {error}");
                    Response::Error(format!("Cannot compute the path: {error}"))
                }
            },
            Request::Search { query } => self.search(query),
        }
    }

    fn search(&self, query: String) -> Response {
        match self.geocoder.geocode(&query) {
            Ok(candidates) if candidates.is_empty() => Response::NotFound { query },
            Ok(candidates) => Response::Candidates { query, candidates },
            Err(error) => {
                log::error!("geocoding `{query}` failed: {error}");
                Response::Error(format!(
                    "An error occurred while searching for the location: {error}"
                ))
            }
        }
    }
}

impl Default for Session<()> {
    fn default() -> Self {
        Self::new(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use gcd_core::{GeocodeError, defaults::*};

    /// answers from a fixed table, fails on `"boom"`
    pub(crate) struct TableGeocoder;

    impl Geocoder for TableGeocoder {
        fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
            match query {
                "Jakarta" => Ok(vec![GeocodeResult::new(
                    "Jakarta, Indonesia",
                    Location::from_degrees(-6.1754, 106.8272).unwrap(),
                )]),
                "boom" => Err(GeocodeError::Status { status: 502 }),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn solve_default() -> Response {
        Session::new(TableGeocoder).handle(Request::Solve {
            start: DEFAULT_START,
            end: DEFAULT_END,
            sampling: Sampling::default(),
        })
    }

    #[test]
    fn solve_request() {
        let Response::Solved(report) = solve_default() else {
            panic!("expected a solved response");
        };

        assert_eq!(report.path().start(), DEFAULT_START);
        assert_eq!(report.path().end(), DEFAULT_END);
        assert_eq!(report.path().len(), 5);
        assert_eq!(report.view().zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn solve_text() {
        let text = solve_default().to_text(DEFAULT_PRECISION);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Distance between start and end: 3"));
        assert!(lines[0].ends_with(" km"));
        assert!(lines[1].starts_with("Initial azimuth: 34"));
        assert!(lines[1].ends_with('°'));
        assert_eq!(lines[4], "Path: 5 points");

        // five decimals
        let distance = lines[0].trim_end_matches(" km").rsplit(' ').next().unwrap();
        assert_eq!(distance.split('.').nth(1).unwrap().len(), 5);
    }

    #[test]
    fn view_is_the_geodesic_midpoint() {
        let session = Session::new(());
        let report = session
            .solve(DEFAULT_START, DEFAULT_END, Sampling::Count(8))
            .unwrap();

        let solver = KarneySolver::default();
        let center = report.view().center;
        let to_start = solver.distance(DEFAULT_START, center).unwrap().as_meters();
        let to_end = solver.distance(center, DEFAULT_END).unwrap().as_meters();
        assert!((to_start - to_end).abs() < 1e-3);
    }

    #[test]
    fn invalid_sampling_is_an_error_response() {
        let response = Session::new(TableGeocoder).handle(Request::Solve {
            start: DEFAULT_START,
            end: DEFAULT_END,
            sampling: Sampling::Count(0),
        });

        assert!(response.is_error());
        assert!(response.to_text(5).contains("at least one segment"));
    }

    #[test]
    fn search_found() {
        let response = Session::new(TableGeocoder).handle(Request::Search {
            query: "Jakarta".to_owned(),
        });

        assert_eq!(
            response.to_text(5),
            "Coordinates for 'Jakarta':\n  1. Jakarta, Indonesia\n     Latitude: -6.1754°, Longitude: 106.8272°"
        );
    }

    #[test]
    fn search_not_found() {
        let response = Session::new(TableGeocoder).handle(Request::Search {
            query: "Atlantis".to_owned(),
        });

        assert_eq!(
            response,
            Response::NotFound {
                query: "Atlantis".to_owned()
            }
        );
        assert!(!response.is_error());
    }

    #[test]
    fn search_failure_is_reported_not_raised() {
        let session = Session::new(TableGeocoder);

        let response = session.handle(Request::Search {
            query: "boom".to_owned(),
        });
        assert!(response.is_error());
        assert!(response.to_text(5).contains("HTTP status 502"));

        // the session keeps working afterwards
        let response = session.handle(Request::Search {
            query: "Jakarta".to_owned(),
        });
        assert!(matches!(response, Response::Candidates { .. }));
    }

    #[test]
    fn geojson_report() {
        let Response::Solved(report) = solve_default() else {
            panic!("expected a solved response");
        };

        let document = report.to_geojson(DEFAULT_PRECISION);
        assert_eq!(document["features"].as_array().unwrap().len(), 3);
        assert_eq!(
            document["features"][2]["geometry"]["coordinates"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }
}
