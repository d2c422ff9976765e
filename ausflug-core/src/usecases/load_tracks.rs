use super::prelude::*;
use crate::gateways::track::{TrackError, TrackGateway};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTrack {
    pub hike: Hike,
    pub geometry: TrackGeometry,
}

#[derive(Debug)]
pub struct TrackFailure {
    pub name: String,
    pub error: TrackError,
}

#[derive(Debug, Default)]
pub struct LoadedTracks {
    pub tracks: Vec<LoadedTrack>,
    pub failed: Vec<TrackFailure>,
}

/// Load the geometries of all hikes.
///
/// A hike whose track cannot be loaded is reported and omitted.
pub fn load_tracks<T>(gateway: &T, hikes: &[Hike]) -> LoadedTracks
where
    T: TrackGateway + ?Sized,
{
    let mut loaded = LoadedTracks::default();
    for hike in hikes {
        let result = gateway.load_track(&hike.file).and_then(|geometry| {
            if geometry.is_empty() {
                Err(TrackError::NoLineGeometry)
            } else {
                Ok(geometry)
            }
        });
        match result {
            Ok(geometry) => {
                log::debug!(
                    "Loaded track '{}' with {} vertices",
                    hike.name,
                    geometry.vertices().count()
                );
                loaded.tracks.push(LoadedTrack {
                    hike: hike.clone(),
                    geometry,
                });
            }
            Err(error) => {
                log::warn!(
                    "Failed to load track '{}' ({}): {error}",
                    hike.name,
                    hike.file.display()
                );
                loaded.failed.push(TrackFailure {
                    name: hike.name.clone(),
                    error,
                });
            }
        }
    }
    loaded
}
