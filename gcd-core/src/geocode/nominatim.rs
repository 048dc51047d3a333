use super::{GeocodeError, GeocodeResult, Geocoder};
use crate::{
    defaults::{
        DEFAULT_GEOCODE_ENDPOINT, DEFAULT_GEOCODE_TIMEOUT, DEFAULT_USER_AGENT, MAX_GEOCODE_RESULTS,
    },
    geo::Location,
};
use log::{debug, warn};
use reqwest::{StatusCode, Url, blocking::Client};
use serde::Deserialize;
use std::time::Duration;

/// Blocking client of a Nominatim compatible `/search` endpoint.
///
/// ```no_run
/// use gcd_core::geocode::{Geocoder, Nominatim};
/// use std::time::Duration;
///
/// let nominatim = Nominatim::builder()
///     .timeout(Duration::from_secs(5))
///     .limit(3)
///     .build()
///     .unwrap();
///
/// for candidate in nominatim.geocode("Monas, Jakarta").unwrap() {
///     println!("{candidate}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    endpoint: Url,
    limit: usize,
    timeout: Duration,
}

/// Configuration of a [`Nominatim`] client.
///
/// Unset values fall back to the crate [`defaults`](crate::defaults).
#[derive(Debug, Clone)]
pub struct NominatimBuilder {
    endpoint: String,
    user_agent: String,
    timeout: Duration,
    limit: usize,
}

impl Default for NominatimBuilder {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODE_ENDPOINT.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_GEOCODE_TIMEOUT,
            limit: MAX_GEOCODE_RESULTS,
        }
    }
}

impl NominatimBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// upper bound on the whole round trip (connect, request and body)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// maximum number of candidates, within `[1, MAX_GEOCODE_RESULTS]`
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> Result<Nominatim, GeocodeError> {
        if !(1..=MAX_GEOCODE_RESULTS).contains(&self.limit) {
            return Err(GeocodeError::InvalidLimit { limit: self.limit });
        }

        let endpoint =
            Url::parse(&self.endpoint).map_err(|error| GeocodeError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: error.to_string(),
            })?;

        let client = Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()
            .map_err(GeocodeError::Client)?;

        Ok(Nominatim {
            client,
            endpoint,
            limit: self.limit,
            timeout: self.timeout,
        })
    }
}

impl Nominatim {
    pub fn builder() -> NominatimBuilder {
        NominatimBuilder::default()
    }

    /// client of the public OpenStreetMap instance with default settings
    pub fn new() -> Result<Self, GeocodeError> {
        Self::builder().build()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Geocoder for Nominatim {
    fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("empty geocoding query, skipping the lookup");
            return Ok(Vec::new());
        }

        debug!("geocoding `{query}` with {}", self.endpoint);

        let limit = self.limit.to_string();
        let response = match self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query), ("format", "jsonv2"), ("limit", limit.as_str())])
            .send()
        {
            Ok(response) => response,
            Err(error) if error.is_timeout() => {
                warn!("geocoding `{query}` timed out after {:?}", self.timeout);
                return Ok(Vec::new());
            }
            Err(error) => return Err(GeocodeError::Transport(error)),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("no location found for `{query}` (HTTP {status})");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }

        let body = match response.text() {
            Ok(body) => body,
            Err(error) if error.is_timeout() => {
                warn!("geocoding `{query}` timed out after {:?}", self.timeout);
                return Ok(Vec::new());
            }
            Err(error) => return Err(GeocodeError::Transport(error)),
        };

        let results = parse_places(&body, self.limit)?;
        if results.is_empty() {
            warn!("no location found for `{query}`");
        } else {
            debug!("`{query}` resolved to {} candidate(s)", results.len());
        }

        Ok(results)
    }
}

/// one entry of a `format=jsonv2` answer, other fields are ignored
#[derive(Debug, Deserialize)]
struct Place {
    display_name: String,
    lat: String,
    lon: String,
}

impl Place {
    fn into_result(self) -> Result<GeocodeResult, GeocodeError> {
        let Self {
            display_name,
            lat,
            lon,
        } = self;

        let location = parse_coordinate(&lat)
            .and_then(|latitude| Ok((latitude, parse_coordinate(&lon)?)))
            .and_then(|(latitude, longitude)| {
                Location::from_degrees(latitude, longitude).map_err(|error| error.to_string())
            });

        match location {
            Ok(location) => Ok(GeocodeResult::new(display_name, location)),
            Err(reason) => Err(GeocodeError::InvalidCoordinate {
                display_name,
                reason,
            }),
        }
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse()
        .map_err(|error| format!("`{raw}` is not a number: {error}"))
}

fn parse_places(body: &str, limit: usize) -> Result<Vec<GeocodeResult>, GeocodeError> {
    let places: Vec<Place> = serde_json::from_str(body).map_err(GeocodeError::Payload)?;

    places
        .into_iter()
        .take(limit)
        .map(Place::into_result)
        .collect()
}
