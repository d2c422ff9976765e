use super::prelude::*;

/// A row of a place table.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRow {
    pub name: String,
    pub description: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub link: String,
}

impl From<&Place> for PlaceRow {
    fn from(place: &Place) -> Self {
        let (lat, lon) = match place.pos {
            Some(pos) => {
                let (lat, lon) = pos.to_lat_lng_deg();
                (Some(lat), Some(lon))
            }
            None => (None, None),
        };
        Self {
            name: place.name.clone(),
            description: place.description.clone().unwrap_or_default(),
            lat,
            lon,
            link: place.link.clone().unwrap_or_default(),
        }
    }
}

/// A row of a hike table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HikeRow {
    pub name: String,
    pub duration: String,
    pub link: String,
}

impl From<&Hike> for HikeRow {
    fn from(hike: &Hike) -> Self {
        Self {
            name: hike.name.clone(),
            duration: hike.duration.clone().unwrap_or_default(),
            link: hike.link.clone().unwrap_or_default(),
        }
    }
}
