use ausflug_core::{
    entities::{MapPoint, TrackGeometry},
    gateways::track::{TrackError, TrackGateway},
};
use ::gpx::Gpx;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

/// GPX files in a local directory.
#[derive(Debug, Clone)]
pub struct GpxFiles {
    base_dir: PathBuf,
}

impl GpxFiles {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl TrackGateway for GpxFiles {
    fn load_track(&self, file: &Path) -> Result<TrackGeometry, TrackError> {
        let path = self.base_dir.join(file);
        log::debug!("Loading track {}", path.display());
        read_track(BufReader::new(File::open(&path)?))
    }
}

pub fn read_track<R: Read>(reader: R) -> Result<TrackGeometry, TrackError> {
    let gpx = ::gpx::read(reader).map_err(|err| TrackError::Parse(err.to_string()))?;
    track_geometry(&gpx)
}

fn track_geometry(gpx: &Gpx) -> Result<TrackGeometry, TrackError> {
    if gpx.tracks.is_empty() {
        return Err(TrackError::NoTracks);
    }
    let lines: Vec<Vec<MapPoint>> = gpx
        .tracks
        .iter()
        .flat_map(|track| &track.segments)
        .map(|segment| {
            segment
                .points
                .iter()
                .filter_map(|wp| {
                    let pt = wp.point();
                    MapPoint::try_from_lat_lng_deg(pt.y(), pt.x())
                })
                .collect::<Vec<_>>()
        })
        .collect();
    let geometry = TrackGeometry::new(lines);
    if geometry.is_empty() {
        return Err(TrackError::NoLineGeometry);
    }
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SEGMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Wasserfallsteig</name>
    <trkseg>
      <trkpt lat="48.4931" lon="9.4042"></trkpt>
      <trkpt lat="48.4950" lon="9.4100"></trkpt>
      <trkpt lat="48.5000" lon="9.4200"></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="48.5010" lon="9.4210"></trkpt>
      <trkpt lat="48.5020" lon="9.4300"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    const WAYPOINTS_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="48.4931" lon="9.4042"></wpt>
</gpx>"#;

    const EMPTY_TRACK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Leer</name>
    <trkseg></trkseg>
  </trk>
</gpx>"#;

    const SINGLE_POINT_SEGMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Startpunkt</name>
    <trkseg>
      <trkpt lat="48.4931" lon="9.4042"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn read_all_segments() {
        let geometry = read_track(TWO_SEGMENTS.as_bytes()).unwrap();
        assert_eq!(geometry.lines().len(), 2);
        assert_eq!(geometry.vertices().count(), 5);
        let bbox = geometry.bbox().unwrap();
        assert_eq!(bbox.south(), 48.4931);
        assert_eq!(bbox.north(), 48.5020);
        assert_eq!(bbox.west(), 9.4042);
        assert_eq!(bbox.east(), 9.4300);
    }

    #[test]
    fn file_without_tracks() {
        let err = read_track(WAYPOINTS_ONLY.as_bytes()).unwrap_err();
        assert!(matches!(err, TrackError::NoTracks));
    }

    #[test]
    fn track_without_points() {
        let err = read_track(EMPTY_TRACK.as_bytes()).unwrap_err();
        assert!(matches!(err, TrackError::NoLineGeometry));
    }

    #[test]
    fn segment_with_a_single_point() {
        let err = read_track(SINGLE_POINT_SEGMENT.as_bytes()).unwrap_err();
        assert!(matches!(err, TrackError::NoLineGeometry));
    }

    #[test]
    fn invalid_xml() {
        let err = read_track("<gpx".as_bytes()).unwrap_err();
        assert!(matches!(err, TrackError::Parse(_)));
    }

    #[test]
    fn missing_file() {
        let files = GpxFiles::new("/nonexistent/tracks");
        let err = files.load_track(Path::new("Rehmhof-Weg.gpx")).unwrap_err();
        assert!(matches!(err, TrackError::Io(_)));
    }
}
