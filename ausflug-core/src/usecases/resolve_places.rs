use super::prelude::*;
use crate::{gateways::geocode::GeoCodingGateway, resolver::AddressResolver};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResolvedPlaces {
    /// All places in their original order, with positions where known.
    pub places: Vec<Place>,
    /// Names of places whose address could not be resolved.
    pub failed: Vec<String>,
    /// Names of places with neither an address nor a position.
    pub skipped: Vec<String>,
}

/// Resolve the addresses of all places without a position.
///
/// Failures never abort the batch. The `progress` callback
/// is invoked with `(done, total)` after every place.
pub fn resolve_places<G, F>(
    resolver: &AddressResolver<G>,
    places: Vec<Place>,
    mut progress: F,
) -> ResolvedPlaces
where
    G: GeoCodingGateway,
    F: FnMut(usize, usize),
{
    let total = places.len();
    let mut resolved = ResolvedPlaces {
        places: Vec::with_capacity(total),
        ..Default::default()
    };
    for (i, place) in places.into_iter().enumerate() {
        let pos = if place.pos.is_some() {
            place.pos
        } else if let Some(addr) = place.address() {
            let pos = resolver.resolve(Some(addr));
            if pos.is_none() {
                log::warn!("Unable to geocode '{}' ({addr})", place.name);
                resolved.failed.push(place.name.clone());
            }
            pos
        } else {
            log::debug!("'{}' has neither an address nor a position", place.name);
            resolved.skipped.push(place.name.clone());
            None
        };
        resolved.places.push(place.with_pos(pos));
        progress(i + 1, total);
    }
    resolved
}
