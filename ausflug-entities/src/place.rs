use crate::{
    geo::MapPoint,
    trip::{TripId, TripItem},
};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum PlaceKind {
    Camping,
    Bakery,
    Supermarket,
    Restaurant,
    Poi,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub trip_id     : TripId,
    pub kind        : PlaceKind,
    pub name        : String,
    pub address     : Option<String>,
    pub description : Option<String>,
    pub link        : Option<String>,
    pub pos         : Option<MapPoint>,
}

impl Place {
    /// The address if it contains more than whitespace.
    pub fn address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .filter(|addr| !addr.trim().is_empty())
    }

    pub fn with_pos(self, pos: Option<MapPoint>) -> Self {
        Self { pos, ..self }
    }
}

impl TripItem for Place {
    fn trip_id(&self) -> TripId {
        self.trip_id
    }
}
