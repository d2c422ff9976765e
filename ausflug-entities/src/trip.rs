use crate::geo::MapPoint;
use std::fmt;

/// Numeric identifier of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(u32);

impl TripId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A candidate destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub center: MapPoint,
}

/// The starting location of a participant.
#[derive(Debug, Clone, PartialEq)]
pub struct Home {
    pub name: String,
    pub pos: MapPoint,
}

/// Anything that is assigned to exactly one trip.
pub trait TripItem {
    fn trip_id(&self) -> TripId;
}
