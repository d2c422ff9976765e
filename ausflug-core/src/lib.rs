//! # ausflug-core
//!
//! Geocoding, viewport fitting and the page workflow
//! that turns the places of a trip into a map.

pub mod gateways;
pub mod map;
pub mod resolver;
pub mod session;
pub mod usecases;
pub mod viewport;

pub mod entities {
    pub use ausflug_entities::{geo::*, place::*, track::*, trip::*};
}
