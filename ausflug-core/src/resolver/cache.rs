use ausflug_entities::geo::MapPoint;
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    pos: Option<MapPoint>,
    stored_at: Instant,
}

/// Memoized geocoding results keyed by the exact address text.
///
/// Failed lookups are cached as well (`None`) so that known-bad
/// addresses are not retried before the entry expires.
#[derive(Debug)]
pub struct GeocodeCache {
    ttl: Option<Duration>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl GeocodeCache {
    /// Entries expire after `ttl`, or never if `None`.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entries: Default::default(),
        }
    }

    /// Returns `Some(result)` on a hit and `None` on a miss.
    pub fn get(&self, address: &str) -> Option<Option<MapPoint>> {
        self.get_at(address, Instant::now())
    }

    pub fn insert(&self, address: &str, pos: Option<MapPoint>) {
        self.insert_at(address, pos, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn get_at(&self, address: &str, now: Instant) -> Option<Option<MapPoint>> {
        let mut entries = self.entries.lock();
        let entry = *entries.get(address)?;
        if self.is_expired(&entry, now) {
            log::debug!("Cached location of '{address}' expired");
            entries.remove(address);
            return None;
        }
        Some(entry.pos)
    }

    fn insert_at(&self, address: &str, pos: Option<MapPoint>, stored_at: Instant) {
        self.entries
            .lock()
            .insert(address.to_string(), CacheEntry { pos, stored_at });
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        self.ttl
            .map(|ttl| now.saturating_duration_since(entry.stored_at) >= ttl)
            .unwrap_or(false)
    }
}

impl Default for GeocodeCache {
    fn default() -> Self {
        Self::new(None)
    }
}
