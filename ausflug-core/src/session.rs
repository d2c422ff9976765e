use ausflug_entities::{geo::MapBbox, trip::TripId};
use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
};

const BOUNDS_PRECISION: f64 = 10_000.0;
const BOUNDS_SIGNATURE_MODULUS: u64 = 1_000_000;

/// Session scoped state of the host UI.
///
/// Keeps track of page visits so that a map widget never
/// restores a stale viewport after a page or trip switch.
#[derive(Debug, Default)]
pub struct Session {
    last_page: Option<String>,
    visits: HashMap<String, u32>,
}

impl Session {
    /// Bumps once when (re)entering a page.
    ///
    /// Re-rendering the page that is already active
    /// does not change the counter.
    pub fn visit_token(&mut self, page_id: &str) -> u32 {
        if self.last_page.as_deref() != Some(page_id) {
            self.last_page = Some(page_id.to_string());
            *self.visits.entry(page_id.to_string()).or_default() += 1;
        }
        self.visits.get(page_id).copied().unwrap_or_default()
    }

    /// Unique key per page visit, trip and plotted bounds.
    pub fn unique_map_key(&mut self, page_id: &str, trip_id: TripId, bbox: &MapBbox) -> String {
        let visit = self.visit_token(page_id);
        let sig = bounds_signature(bbox);
        format!("{page_id}_map_{trip_id}_{visit}_{sig}")
    }
}

/// Short hash of the bounding box rounded to four decimals.
pub fn bounds_signature(bbox: &MapBbox) -> u64 {
    let mut hasher = DefaultHasher::new();
    for deg in [bbox.south(), bbox.west(), bbox.north(), bbox.east()] {
        ((deg * BOUNDS_PRECISION).round() as i64).hash(&mut hasher);
    }
    hasher.finish() % BOUNDS_SIGNATURE_MODULUS
}
