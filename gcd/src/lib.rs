/*!
# gcd

Presentation layer of the great-circle distance tool: a request/response
[`Session`](session::Session) over the geodesic solver and the geocoder, and
a line oriented [`repl`] on top of it.

```
use gcd::session::Session;
use gcd_core::{Sampling, defaults::{DEFAULT_END, DEFAULT_START}};

let session = Session::new(());
let report = session
    .solve(DEFAULT_START, DEFAULT_END, Sampling::Count(4))
    .unwrap();
assert_eq!(report.path().len(), 5);
```
*/

pub mod repl;
pub mod session;

/// Output format of a solved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// distance and azimuths, one per line
    #[default]
    Text,
    /// GeoJSON `FeatureCollection` with markers, path and view
    Geojson,
}
