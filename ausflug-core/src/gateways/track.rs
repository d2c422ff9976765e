use ausflug_entities::track::TrackGeometry;
use std::{io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Unable to read track file: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid track file: {0}")]
    Parse(String),
    #[error("No track data")]
    NoTracks,
    #[error("No line geometry")]
    NoLineGeometry,
}

pub trait TrackGateway {
    fn load_track(&self, file: &Path) -> Result<TrackGeometry, TrackError>;
}
