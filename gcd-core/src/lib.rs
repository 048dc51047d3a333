/*!
# Great-circle distance core

Geodesic distance, azimuths and path sampling between two coordinates on
the reference ellipsoid, plus a thin adapter over a Nominatim geocoding
service.

```
use gcd_core::geo::{GeodesicSolver, KarneySolver, Location};

let jakarta = Location::from_degrees(6.20889, 106.82750).unwrap();
let qinghai = Location::from_degrees(35.5, 100.0).unwrap();

let solver = KarneySolver::default();
let distance = solver.distance(jakarta, qinghai).unwrap();
assert!(distance.as_kilometers() > 3_000.0);

let path = solver.sample_path(jakarta, qinghai, 8).unwrap();
assert_eq!(path.len(), 9);
```
*/

pub mod defaults;
pub mod geo;
pub mod geocode;
pub mod measure;
pub mod render;
pub mod time;

pub use self::{
    geo::{
        GeoError, GeodesicSolution, GeodesicSolver, KarneySolver, Latitude, Location, Longitude,
        PathSample, Sampling, Spheroid,
    },
    geocode::{GeocodeError, GeocodeResult, Geocoder, Nominatim},
    measure::{Azimuth, Distance},
};
