//! Turns free-text addresses into coordinates.
//!
//! Results are memoized in a [`GeocodeCache`] and outbound lookups
//! are spaced by a [`RateLimiter`]. Lookups are serialized: at most
//! one request to the geocoding gateway is in flight at any time.

use crate::gateways::geocode::GeoCodingGateway;
use ausflug_entities::geo::MapPoint;
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};

mod cache;
mod rate_limit;

pub use self::{cache::GeocodeCache, rate_limit::RateLimiter};

/// Usage policy of the public Nominatim service.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub cache_hits: usize,
    pub lookups: usize,
    pub failed_lookups: usize,
}

#[derive(Debug)]
pub struct AddressResolver<G> {
    gateway: G,
    cache: Arc<GeocodeCache>,
    limiter: Mutex<RateLimiter>,
    stats: Mutex<ResolverStats>,
}

impl<G> AddressResolver<G>
where
    G: GeoCodingGateway,
{
    pub fn new(gateway: G, cache: Arc<GeocodeCache>, min_delay: Duration) -> Self {
        Self {
            gateway,
            cache,
            limiter: Mutex::new(RateLimiter::new(min_delay)),
            stats: Default::default(),
        }
    }

    pub fn cache(&self) -> &Arc<GeocodeCache> {
        &self.cache
    }

    pub fn stats(&self) -> ResolverStats {
        *self.stats.lock()
    }

    /// Resolve an address into a position.
    ///
    /// Blank or missing addresses are never looked up.
    pub fn resolve(&self, address: Option<&str>) -> Option<MapPoint> {
        let address = address.filter(|addr| !addr.trim().is_empty())?;
        if let Some(pos) = self.cached(address) {
            return pos;
        }
        let mut limiter = self.limiter.lock();
        // Another caller might have resolved the same
        // address while we were waiting for the lock.
        if let Some(pos) = self.cached(address) {
            return pos;
        }
        limiter.wait();
        let pos = self.lookup(address);
        self.cache.insert(address, pos);
        pos
    }

    fn cached(&self, address: &str) -> Option<Option<MapPoint>> {
        let pos = self.cache.get(address)?;
        log::debug!("Cache hit for '{address}': {pos:?}");
        self.stats.lock().cache_hits += 1;
        Some(pos)
    }

    fn lookup(&self, address: &str) -> Option<MapPoint> {
        log::debug!("Cache miss for '{address}': calling geocoding gateway");
        let pos = self
            .gateway
            .resolve_address_lat_lng(address)
            .and_then(|(lat, lng)| {
                let pos = MapPoint::try_from_lat_lng_deg(lat, lng);
                if pos.is_none() {
                    log::warn!("Resolved invalid location of '{address}': ({lat}, {lng})");
                }
                pos
            });
        let mut stats = self.stats.lock();
        stats.lookups += 1;
        if pos.is_none() {
            stats.failed_lookups += 1;
            log::info!("Unable to resolve location of '{address}'");
        }
        pos
    }
}
