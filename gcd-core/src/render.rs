//! GeoJSON rendering of a solved request.
//!
//! The document is an RFC 7946 `FeatureCollection` with a start marker, an
//! end marker and the sampled path as a `LineString`, plus a `view` foreign
//! member a map or globe widget can use to place its camera.

use crate::{
    defaults::DEFAULT_ZOOM,
    geo::{GeodesicSolution, Location, PathSample},
};
use serde_json::{Value, json};

const START_COLOR: &str = "green";
const END_COLOR: &str = "red";
const PATH_COLOR: &str = "red";

/// Suggested camera for displaying a result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: Location,
    pub zoom: u8,
}

impl View {
    pub fn new(center: Location) -> Self {
        Self {
            center,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    fn to_json(self) -> Value {
        let (latitude, longitude) = self.center.to_degrees();
        json!({
            "center": [longitude, latitude],
            "zoom": self.zoom,
        })
    }
}

/// `[longitude, latitude]` positions with longitudes unwrapped so that two
/// consecutive positions are never more than 180° apart.
///
/// The unwrapped longitudes may leave `[-180, 180]`; map widgets draw the
/// line across the antimeridian instead of around the world.
///
/// ```
/// # use gcd_core::{geo::Location, render::unwrap_longitudes};
/// let path = [
///     Location::from_degrees(0.0, 170.0).unwrap(),
///     Location::from_degrees(0.0, -175.0).unwrap(),
/// ];
/// assert_eq!(unwrap_longitudes(&path), vec![[170.0, 0.0], [185.0, 0.0]]);
/// ```
pub fn unwrap_longitudes(points: &[Location]) -> Vec<[f64; 2]> {
    let mut positions = Vec::with_capacity(points.len());
    let mut previous: Option<f64> = None;

    for point in points {
        let (latitude, mut longitude) = point.to_degrees();
        if let Some(previous) = previous {
            while longitude - previous > 180.0 {
                longitude -= 360.0;
            }
            while longitude - previous < -180.0 {
                longitude += 360.0;
            }
        }
        previous = Some(longitude);
        positions.push([longitude, latitude]);
    }

    positions
}

fn marker(role: &str, title: &str, color: &str, location: Location, precision: usize) -> Value {
    let (latitude, longitude) = location.to_degrees();
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [longitude, latitude],
        },
        "properties": {
            "role": role,
            "marker-color": color,
            "popup": format!(
                "{title}\nLatitude: {:.*}, Longitude: {:.*}",
                precision, location.latitude, precision, location.longitude
            ),
        },
    })
}

/// Build the GeoJSON document for a solved request.
///
/// `precision` is the number of decimals used in the human readable
/// popups; coordinates and numeric properties are not rounded.
pub fn feature_collection(
    solution: &GeodesicSolution,
    path: &PathSample,
    view: View,
    precision: usize,
) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            marker("start", "Start", START_COLOR, solution.start(), precision),
            marker("end", "End", END_COLOR, solution.end(), precision),
            {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": unwrap_longitudes(path),
                },
                "properties": {
                    "role": "path",
                    "stroke": PATH_COLOR,
                    "stroke-width": 2.5,
                    "distance_km": solution.distance().as_kilometers(),
                    "initial_azimuth": solution.initial_azimuth().as_degrees(),
                    "final_azimuth": solution.final_azimuth().as_degrees(),
                    "back_azimuth": solution.back_azimuth().as_degrees(),
                },
            },
        ],
        "view": view.to_json(),
    })
}
