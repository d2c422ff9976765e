use super::*;
use crate::{
    entities::*,
    gateways::{
        geocode::GeoCodingGateway,
        track::{TrackError, TrackGateway},
    },
    resolver::AddressResolver,
    session::Session,
};
use ausflug_entities::builders::*;
use std::{
    cell::RefCell,
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Default)]
pub struct MockGeoCoder {
    locations: HashMap<String, (f64, f64)>,
    calls: RefCell<Vec<String>>,
}

impl MockGeoCoder {
    pub fn with(locations: &[(&str, (f64, f64))]) -> Self {
        Self {
            locations: locations
                .iter()
                .map(|(addr, pos)| (addr.to_string(), *pos))
                .collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl GeoCodingGateway for MockGeoCoder {
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)> {
        self.calls.borrow_mut().push(addr.to_string());
        self.locations.get(addr).copied()
    }
}

#[derive(Default)]
pub struct MockTracks {
    tracks: HashMap<PathBuf, TrackGeometry>,
}

impl MockTracks {
    pub fn with(file: &str, points: &[(f64, f64)]) -> Self {
        let mut tracks = Self::default();
        tracks.insert(file, points);
        tracks
    }

    pub fn insert(&mut self, file: &str, points: &[(f64, f64)]) {
        let line = points
            .iter()
            .map(|(lat, lng)| MapPoint::from_lat_lng_deg(*lat, *lng))
            .collect();
        self.tracks
            .insert(PathBuf::from(file), TrackGeometry::new(vec![line]));
    }
}

impl TrackGateway for MockTracks {
    fn load_track(&self, file: &Path) -> std::result::Result<TrackGeometry, TrackError> {
        self.tracks
            .get(file)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file").into())
    }
}

fn resolver(gw: &MockGeoCoder) -> AddressResolver<&MockGeoCoder> {
    AddressResolver::new(gw, Default::default(), Duration::ZERO)
}

fn trip(id: u32, name: &str, lat: f64, lng: f64) -> Trip {
    Trip {
        id: TripId::new(id),
        name: name.into(),
        center: MapPoint::from_lat_lng_deg(lat, lng),
    }
}

fn dataset() -> Dataset {
    Dataset {
        trips: vec![
            trip(1, "Radolfzell am Bodensee", 47.7452, 8.9669),
            trip(2, "Bad Urach", 48.4931, 9.4042),
        ],
        homes: vec![Home {
            name: "Base MM".into(),
            pos: MapPoint::from_lat_lng_deg(49.2951, 8.6989),
        }],
        places: vec![],
        hikes: vec![],
        default_trip: Some(TripId::new(2)),
    }
}

fn three_places() -> Vec<Place> {
    vec![
        Place::build()
            .kind(PlaceKind::Restaurant)
            .name("A")
            .address("Valid St 1")
            .finish(),
        Place::build()
            .kind(PlaceKind::Restaurant)
            .name("B")
            .address("")
            .finish(),
        Place::build()
            .kind(PlaceKind::Restaurant)
            .name("C")
            .address("Bad Address XX")
            .finish(),
    ]
}

#[test]
fn resolve_valid_blank_and_bad_address() {
    let gw = MockGeoCoder::with(&[("Valid St 1", (47.0, 9.0))]);
    let resolver = resolver(&gw);
    let mut progress = vec![];
    let resolved = resolve_places(&resolver, three_places(), |done, total| {
        progress.push((done, total))
    });

    assert_eq!(gw.calls(), vec!["Valid St 1", "Bad Address XX"]);
    assert_eq!(resolved.failed, vec!["C"]);
    assert_eq!(resolved.skipped, vec!["B"]);
    assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);

    let positions: Vec<_> = resolved.places.iter().filter_map(|p| p.pos).collect();
    let a = MapPoint::from_lat_lng_deg(47.0, 9.0);
    assert_eq!(positions, vec![a]);

    let center = MapPoint::from_lat_lng_deg(47.7452, 8.9669);
    let mut points = crate::viewport::FitPoints::seeded(center);
    points.extend(positions);
    let bbox = points.bbox();
    assert!(bbox.contains_point(a));
    assert!(bbox.contains_point(center));
}

#[test]
fn places_with_coordinates_are_not_looked_up() {
    let gw = MockGeoCoder::default();
    let resolver = resolver(&gw);
    let camp = Place::build()
        .kind(PlaceKind::Camping)
        .name("Campingplatz Willam")
        .address("Schlafbach 10, 78315 Radolfzell")
        .pos(MapPoint::from_lat_lng_deg(47.7366, 8.9993))
        .finish();
    let resolved = resolve_places(&resolver, vec![camp.clone()], |_, _| {});
    assert!(gw.calls().is_empty());
    assert_eq!(resolved.places, vec![camp]);
    assert!(resolved.failed.is_empty());
}

#[test]
fn reuse_address_across_trips() {
    let gw = MockGeoCoder::with(&[("Valid St 1", (47.0, 9.0))]);
    let resolver = resolver(&gw);
    let places = vec![
        Place::build().trip(1).name("A").address("Valid St 1").finish(),
        Place::build().trip(2).name("A").address("Valid St 1").finish(),
    ];
    let first = resolve_places(
        &resolver,
        filter_by_trip(&places, TripId::new(1)),
        |_, _| {},
    );
    let second = resolve_places(
        &resolver,
        filter_by_trip(&places, TripId::new(2)),
        |_, _| {},
    );
    assert_eq!(first.places[0].pos, second.places[0].pos);
    assert!(first.places[0].pos.is_some());
    assert_eq!(gw.calls().len(), 1);
}

#[test]
fn collect_track_failures() {
    let tracks = MockTracks::with("rehmhof.gpx", &[(47.70, 8.95), (47.72, 8.98)]);
    let hikes = vec![
        Hike::build().name("Rehmhof-Weg").file("rehmhof.gpx").finish(),
        Hike::build().name("Verschollen").file("missing.gpx").finish(),
    ];
    let loaded = load_tracks(&tracks, &hikes);
    assert_eq!(loaded.tracks.len(), 1);
    assert_eq!(loaded.tracks[0].hike.name, "Rehmhof-Weg");
    assert_eq!(loaded.failed.len(), 1);
    assert_eq!(loaded.failed[0].name, "Verschollen");
    assert!(matches!(loaded.failed[0].error, TrackError::Io(_)));
}

#[test]
fn empty_track_geometry_is_a_failure() {
    let tracks = MockTracks::with("empty.gpx", &[]);
    let hikes = vec![Hike::build().name("Leer").file("empty.gpx").finish()];
    let loaded = load_tracks(&tracks, &hikes);
    assert!(loaded.tracks.is_empty());
    assert!(matches!(
        loaded.failed[0].error,
        TrackError::NoLineGeometry
    ));
}

#[test]
fn single_vertex_track_is_a_failure() {
    let tracks = MockTracks::with("start.gpx", &[(48.4931, 9.4042)]);
    let hikes = vec![Hike::build().name("Startpunkt").file("start.gpx").finish()];
    let loaded = load_tracks(&tracks, &hikes);
    assert!(loaded.tracks.is_empty());
    assert_eq!(loaded.failed[0].name, "Startpunkt");
    assert!(matches!(
        loaded.failed[0].error,
        TrackError::NoLineGeometry
    ));
}

mod plan {
    use super::*;
    use crate::map::Icon;

    fn settings() -> MapSettings {
        MapSettings::default()
    }

    #[test]
    fn select_default_trip() {
        let gw = MockGeoCoder::default();
        let resolver = resolver(&gw);
        let tracks = MockTracks::default();
        let settings = settings();
        let ctx = PageContext {
            resolver: &resolver,
            tracks: &tracks,
            settings: &settings,
        };
        let mut session = Session::default();
        let plan = plan_page(
            &ctx,
            &mut session,
            &dataset(),
            Page::Camping,
            None,
            |_, _| {},
        )
        .unwrap();
        assert_eq!(plan.trip.id, TripId::new(2));
    }

    #[test]
    fn unknown_trip() {
        let gw = MockGeoCoder::default();
        let resolver = resolver(&gw);
        let tracks = MockTracks::default();
        let settings = settings();
        let ctx = PageContext {
            resolver: &resolver,
            tracks: &tracks,
            settings: &settings,
        };
        let err = plan_page(
            &ctx,
            &mut Session::default(),
            &dataset(),
            Page::Pois,
            Some(TripId::new(99)),
            |_, _| {},
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownTrip(id) if id == TripId::new(99)));
    }

    #[test]
    fn no_trips_at_all() {
        let gw = MockGeoCoder::default();
        let resolver = resolver(&gw);
        let tracks = MockTracks::default();
        let settings = settings();
        let ctx = PageContext {
            resolver: &resolver,
            tracks: &tracks,
            settings: &settings,
        };
        let err = plan_page(
            &ctx,
            &mut Session::default(),
            &Dataset::default(),
            Page::Camping,
            None,
            |_, _| {},
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoTrips));
    }

    #[test]
    fn restaurants_page() {
        let gw = MockGeoCoder::with(&[("Valid St 1", (47.0, 9.0))]);
        let resolver = resolver(&gw);
        let tracks = MockTracks::default();
        let settings = settings();
        let ctx = PageContext {
            resolver: &resolver,
            tracks: &tracks,
            settings: &settings,
        };
        let mut dataset = dataset();
        dataset.places = three_places();
        dataset.places.push(
            Place::build()
                .kind(PlaceKind::Camping)
                .name("Campingplatz Willam")
                .pos(MapPoint::from_lat_lng_deg(47.7366, 8.9993))
                .finish(),
        );
        dataset.places.push(
            Place::build()
                .trip(2)
                .kind(PlaceKind::Restaurant)
                .name("Other trip")
                .address("Somewhere 2")
                .finish(),
        );
        let mut session = Session::default();
        let plan = plan_page(
            &ctx,
            &mut session,
            &dataset,
            Page::Restaurants,
            Some(TripId::new(1)),
            |_, _| {},
        )
        .unwrap();

        assert_eq!(plan.failed_places, vec!["C"]);
        assert_eq!(gw.calls(), vec!["Valid St 1", "Bad Address XX"]);

        // The single camp is the center
        assert_eq!(plan.map.center, MapPoint::from_lat_lng_deg(47.7366, 8.9993));
        assert_eq!(plan.map.zoom, 12);

        let names: Vec<_> = plan.map.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["🏕️ Camping", "🍴 Restaurants"]);
        let camping = &plan.map.layers[0];
        assert_eq!(camping.markers.len(), 1);
        assert!(!camping.clustered);
        assert!(matches!(camping.markers[0].icon, Icon::Image { .. }));
        let restaurants = &plan.map.layers[1];
        assert!(restaurants.clustered);
        assert_eq!(restaurants.markers.len(), 1);
        assert_eq!(
            restaurants.markers[0].pos,
            MapPoint::from_lat_lng_deg(47.0, 9.0)
        );

        let fit = plan.map.fit.unwrap();
        assert_eq!(fit.max_zoom, 15);
        assert_eq!(fit.padding_px, 24);
        assert!(fit.bbox.contains_point(MapPoint::from_lat_lng_deg(47.0, 9.0)));
        assert!(fit
            .bbox
            .contains_point(MapPoint::from_lat_lng_deg(47.7366, 8.9993)));
        assert_eq!(plan.map.refit.as_ref().unwrap().fit(), &fit);
        assert!(plan.map.key.starts_with("restaurants_map_1_1_"));

        // Only restaurants are listed in the table
        let rows = plan.place_rows();
        let row_names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(row_names, vec!["A", "B", "C"]);
        assert_eq!(rows[0].lat, Some(47.0));
        assert_eq!(rows[1].lat, None);
    }

    #[test]
    fn revisiting_a_page_changes_the_key() {
        let gw = MockGeoCoder::default();
        let resolver = resolver(&gw);
        let tracks = MockTracks::default();
        let settings = settings();
        let ctx = PageContext {
            resolver: &resolver,
            tracks: &tracks,
            settings: &settings,
        };
        let dataset = dataset();
        let mut session = Session::default();
        let mut key = |page| {
            plan_page(&ctx, &mut session, &dataset, page, None, |_, _| {})
                .unwrap()
                .map
                .key
        };
        let first = key(Page::Camping);
        assert_eq!(first, key(Page::Camping));
        key(Page::Restaurants);
        let again = key(Page::Camping);
        assert_ne!(first, again);
        assert!(again.starts_with("camping_map_2_2_"));
    }

    #[test]
    fn pois_page_with_hikes() {
        let gw = MockGeoCoder::with(&[("Schloss 1", (48.49, 9.39))]);
        let resolver = resolver(&gw);
        let mut tracks = MockTracks::with("a.gpx", &[(48.40, 9.30), (48.45, 9.35)]);
        tracks.insert("b.gpx", &[(48.50, 9.45), (48.60, 9.50)]);
        let settings = settings();
        let ctx = PageContext {
            resolver: &resolver,
            tracks: &tracks,
            settings: &settings,
        };
        let mut dataset = dataset();
        dataset.places = vec![Place::build()
            .trip(2)
            .kind(PlaceKind::Poi)
            .name("Residenzschloss")
            .address("Schloss 1")
            .finish()];
        dataset.hikes = vec![
            Hike::build().trip(2).name("Wasserfallsteig").file("a.gpx").finish(),
            Hike::build().trip(2).name("Hohenurach").file("b.gpx").finish(),
            Hike::build().trip(2).name("Kaputt").file("c.gpx").finish(),
            Hike::build().trip(1).name("Anderswo").file("a.gpx").finish(),
        ];
        let plan = plan_page(
            &ctx,
            &mut Session::default(),
            &dataset,
            Page::Pois,
            None,
            |_, _| {},
        )
        .unwrap();

        assert_eq!(plan.map.center, dataset.trips[1].center);
        assert_eq!(plan.map.zoom, 10);
        assert_eq!(plan.hikes.len(), 3);
        assert_eq!(plan.hike_rows().len(), 3);
        assert_eq!(plan.failed_tracks.len(), 1);
        assert_eq!(plan.failed_tracks[0].name, "Kaputt");

        let hikes = plan
            .map
            .layers
            .iter()
            .find(|l| l.name == "🥾 Wanderungen")
            .unwrap();
        assert!(hikes.polylines.is_empty());
        let names: Vec<_> = hikes.children.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["🥾 Wasserfallsteig", "🥾 Hohenurach"]);
        assert_eq!(hikes.children[0].polylines.len(), 1);
        assert_eq!(hikes.children[0].polylines[0].color, "#e41a1c");
        assert_eq!(hikes.children[1].polylines[0].color, "#377eb8");

        let bbox = plan.map.fit.unwrap().bbox;
        assert_eq!(bbox.south(), 48.40);
        assert_eq!(bbox.north(), 48.60);
        assert_eq!(bbox.west(), 9.30);
        assert_eq!(bbox.east(), 9.50);
        assert_eq!(plan.places.len(), 1);
        assert_eq!(plan.places[0].name, "Residenzschloss");
    }

    #[test]
    fn overview_page() {
        let gw = MockGeoCoder::default();
        let resolver = resolver(&gw);
        let tracks = MockTracks::default();
        let settings = settings();
        let ctx = PageContext {
            resolver: &resolver,
            tracks: &tracks,
            settings: &settings,
        };
        let dataset = dataset();
        let plan = plan_page(
            &ctx,
            &mut Session::default(),
            &dataset,
            Page::Overview,
            Some(TripId::new(1)),
            |_, _| {},
        )
        .unwrap();
        assert!(gw.calls().is_empty());
        assert_eq!(plan.map.key, "overview_start");
        assert_eq!(plan.map.zoom, 7);
        assert!(!plan.map.layer_control);
        assert_eq!(plan.map.fit.unwrap().max_zoom, 7);
        let refit = plan.map.refit.as_ref().unwrap().fit();
        assert_eq!(refit.max_zoom, 12);
        assert_eq!(refit.padding_px, 32);
        assert!(refit
            .bbox
            .contains_point(MapPoint::from_lat_lng_deg(49.2951, 8.6989)));
        assert!(refit.bbox.contains_point(dataset.trips[0].center));
        assert_eq!(plan.map.marker_count(), 3);
    }
}
