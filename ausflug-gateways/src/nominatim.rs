//! Forward geocoding with a [Nominatim](https://nominatim.org) service.
//!
//! The public instance requires an identifying user agent and
//! allows at most one request per second. Spacing the requests
//! is up to the caller.

use ausflug_core::gateways::geocode::GeoCodingGateway;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::{num::ParseFloatError, time::Duration};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = concat!("ausflug/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Invalid coordinate: {0}")]
    Coordinate(#[from] ParseFloatError),
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

impl SearchResult {
    fn lat_lng(&self) -> Result<(f64, f64), Error> {
        Ok((self.lat.trim().parse()?, self.lon.trim().parse()?))
    }
}

#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    endpoint: String,
}

impl Nominatim {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    fn search(&self, addr: &str) -> Result<Option<(f64, f64)>, Error> {
        let results: Vec<SearchResult> = self
            .client
            .get(&self.endpoint)
            .query(&[("q", addr), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()?;
        results.first().map(SearchResult::lat_lng).transpose()
    }
}

impl GeoCodingGateway for Nominatim {
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)> {
        match self.search(addr) {
            Ok(Some(lat_lng)) => {
                log::debug!("Resolved address location '{addr}': {lat_lng:?}");
                Some(lat_lng)
            }
            Ok(None) => {
                log::debug!("No location found for '{addr}'");
                None
            }
            Err(err) => {
                log::warn!("Failed to resolve address location '{addr}': {err}");
                None
            }
        }
    }
}
