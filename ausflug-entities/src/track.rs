use crate::{
    geo::{MapBbox, MapPoint},
    trip::{TripId, TripItem},
};
use std::path::PathBuf;

/// A hiking route of a trip.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Hike {
    pub trip_id  : TripId,
    pub name     : String,
    pub file     : PathBuf,
    pub duration : Option<String>,
    pub link     : Option<String>,
}

impl TripItem for Hike {
    fn trip_id(&self) -> TripId {
        self.trip_id
    }
}

/// The line geometry of a track file.
///
/// Each line is a sequence of vertices, e.g. one per track segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackGeometry {
    lines: Vec<Vec<MapPoint>>,
}

impl TrackGeometry {
    /// Drops lines with less than two vertices.
    pub fn new(lines: Vec<Vec<MapPoint>>) -> Self {
        let lines = lines.into_iter().filter(|l| l.len() >= 2).collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[Vec<MapPoint>] {
        &self.lines
    }

    pub fn vertices(&self) -> impl Iterator<Item = MapPoint> + '_ {
        self.lines.iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn bbox(&self) -> Option<MapBbox> {
        MapBbox::from_points(self.vertices())
    }
}
