//! Implementations of the gateways of `ausflug-core`.

pub mod gpx;
pub mod leaflet;
pub mod nominatim;
pub mod opencage;
