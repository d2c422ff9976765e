use super::{
    filter_by_trip, load_tracks, prelude::*, resolve_places, HikeRow, PlaceRow, TrackFailure,
};
use crate::{
    gateways::{geocode::GeoCodingGateway, track::TrackGateway},
    map::{escape_html, Icon, Layer, MapPlan, Marker, Polyline},
    resolver::AddressResolver,
    session::Session,
    viewport::{apply_viewport, FitPoints, PendingRefit, RefitSchedule, ViewportFit, ZoomLimits},
};
use strum::{AsRefStr, Display, EnumIter, EnumString};

const CAMP_ICON_URL: &str = "https://cdn-icons-png.flaticon.com/512/9173/9173952.png";
const HOME_ICON_URL: &str = "https://cdn-icons-png.flaticon.com/512/25/25694.png";
const DEST_ICON_URL: &str = "https://cdn-icons-png.flaticon.com/512/684/684908.png";
const IMAGE_ICON_SIZE: (u16, u16) = (40, 40);
const IMAGE_ICON_ANCHOR: (u16, u16) = (20, 40);

const TRACK_PALETTE: [&str; 9] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];
const TRACK_WEIGHT: u8 = 3;
const HIKES_LAYER: &str = "🥾 Wanderungen";

const TRIP_ZOOM: u8 = 10;
const SINGLE_CAMP_ZOOM: u8 = 12;
const MULTI_CAMP_ZOOM: u8 = 11;

const OVERVIEW_MAP_KEY: &str = "overview_start";
const OVERVIEW_ZOOM: u8 = 7;
const OVERVIEW_FIT_MAX_ZOOM: u8 = 7;
const OVERVIEW_REFIT_MAX_ZOOM: u8 = 12;
const OVERVIEW_REFIT_PADDING_PX: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Page {
    Overview,
    Camping,
    Pois,
    Restaurants,
}

impl Page {
    /// The kinds of places shown on the map, in layer order.
    pub fn place_kinds(self) -> &'static [PlaceKind] {
        match self {
            Self::Overview => &[],
            Self::Camping => &[PlaceKind::Camping, PlaceKind::Bakery, PlaceKind::Supermarket],
            Self::Pois => &[PlaceKind::Camping, PlaceKind::Poi],
            Self::Restaurants => &[PlaceKind::Camping, PlaceKind::Restaurant],
        }
    }

    /// The kinds of places listed in the table below the map.
    pub fn table_kinds(self) -> &'static [PlaceKind] {
        match self {
            Self::Overview => &[],
            Self::Camping => &[PlaceKind::Camping],
            Self::Pois => &[PlaceKind::Poi],
            Self::Restaurants => &[PlaceKind::Restaurant],
        }
    }

    pub const fn shows_hikes(self) -> bool {
        matches!(self, Self::Pois)
    }

    /// Center the map on the camps of the trip instead of its nominal center.
    const fn centers_on_camps(self) -> bool {
        matches!(self, Self::Camping | Self::Restaurants)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub trips: Vec<Trip>,
    pub homes: Vec<Home>,
    pub places: Vec<Place>,
    pub hikes: Vec<Hike>,
    /// The trip that is shown if none is selected.
    pub default_trip: Option<TripId>,
}

impl Dataset {
    pub fn trip(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    pub fn select_trip(&self, id: Option<TripId>) -> Result<&Trip> {
        match id.or(self.default_trip) {
            Some(id) => self.trip(id).ok_or(Error::UnknownTrip(id)),
            None => self.trips.first().ok_or(Error::NoTrips),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub zoom: ZoomLimits,
    pub padding_px: u16,
    pub refit: RefitSchedule,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: Default::default(),
            padding_px: crate::viewport::DEFAULT_PADDING_PX,
            refit: Default::default(),
        }
    }
}

#[derive(Debug)]
pub struct PagePlan {
    pub page: Page,
    pub trip: Trip,
    pub map: MapPlan,
    /// Places listed in the table, with resolved positions.
    pub places: Vec<Place>,
    pub hikes: Vec<Hike>,
    pub failed_places: Vec<String>,
    pub failed_tracks: Vec<TrackFailure>,
}

impl PagePlan {
    pub fn place_rows(&self) -> Vec<PlaceRow> {
        self.places.iter().map(PlaceRow::from).collect()
    }

    pub fn hike_rows(&self) -> Vec<HikeRow> {
        self.hikes.iter().map(HikeRow::from).collect()
    }
}

/// Everything a page needs besides the dataset itself.
#[derive(Debug)]
pub struct PageContext<'a, G, T: ?Sized> {
    pub resolver: &'a AddressResolver<G>,
    pub tracks: &'a T,
    pub settings: &'a MapSettings,
}

/// Plan the map and tables of a page for a trip.
///
/// Per-item failures (addresses, track files) are
/// collected in the plan and never abort the page.
pub fn plan_page<G, T, F>(
    ctx: &PageContext<G, T>,
    session: &mut Session,
    dataset: &Dataset,
    page: Page,
    trip_id: Option<TripId>,
    progress: F,
) -> Result<PagePlan>
where
    G: GeoCodingGateway,
    T: TrackGateway + ?Sized,
    F: FnMut(usize, usize),
{
    let trip = dataset.select_trip(trip_id)?.clone();
    log::debug!("Plan page '{page}' of trip {} ({})", trip.id, trip.name);
    if page == Page::Overview {
        return Ok(plan_overview(ctx.settings, dataset, trip));
    }

    let kinds = page.place_kinds();
    let places: Vec<_> = filter_by_trip(&dataset.places, trip.id)
        .into_iter()
        .filter(|p| kinds.contains(&p.kind))
        .collect();
    let hikes = if page.shows_hikes() {
        filter_by_trip(&dataset.hikes, trip.id)
    } else {
        vec![]
    };

    let camps: Vec<_> = places
        .iter()
        .filter(|p| p.kind == PlaceKind::Camping)
        .filter_map(|p| p.pos)
        .collect();
    let (center, zoom) = if page.centers_on_camps() {
        initial_view(&trip, &camps)
    } else {
        (trip.center, TRIP_ZOOM)
    };
    let mut map = MapPlan::new(trip.name.clone(), center, zoom);
    let mut points = FitPoints::seeded(center);

    let resolved = resolve_places(ctx.resolver, places, progress);
    for &kind in kinds {
        let style = PlaceStyle::of(kind);
        let mut layer = Layer::new(style.layer, style.clustered);
        for place in resolved.places.iter().filter(|p| p.kind == kind) {
            if let Some(pos) = place.pos {
                layer.markers.push(style.marker(place, pos));
                points.push(pos);
            }
        }
        map.layers.push(layer);
    }
    if !resolved.failed.is_empty() {
        log::warn!(
            "{} places of trip {} could not be geocoded",
            resolved.failed.len(),
            trip.id
        );
    }

    let mut failed_tracks = vec![];
    if page.shows_hikes() {
        let loaded = load_tracks(ctx.tracks, &hikes);
        let mut layer = Layer::new(HIKES_LAYER, false);
        for (track, color) in loaded.tracks.iter().zip(TRACK_PALETTE.iter().cycle()) {
            if let Some(bbox) = track.geometry.bbox() {
                points.push_bbox(&bbox);
            }
            let mut hike = Layer::new(format!("🥾 {}", track.hike.name), false);
            hike.polylines.push(Polyline {
                lines: track.geometry.lines().to_vec(),
                color: color.to_string(),
                weight: TRACK_WEIGHT,
                popup: Some(hike_popup(&track.hike)),
            });
            layer.children.push(hike);
        }
        map.layers.push(layer);
        failed_tracks = loaded.failed;
    }

    let fit = points.fit(ctx.settings.zoom, ctx.settings.padding_px);
    let refit = apply_viewport(&mut map, fit, ctx.settings.refit.clone());
    map.refit = Some(refit);
    map.key = session.unique_map_key(page.as_ref(), trip.id, &fit.bbox);

    let table_kinds = page.table_kinds();
    let places = resolved
        .places
        .into_iter()
        .filter(|p| table_kinds.contains(&p.kind))
        .collect();

    Ok(PagePlan {
        page,
        trip,
        map,
        places,
        hikes,
        failed_places: resolved.failed,
        failed_tracks,
    })
}

/// Mean of the camp positions if there are any.
fn initial_view(trip: &Trip, camps: &[MapPoint]) -> (MapPoint, u8) {
    if camps.is_empty() {
        return (trip.center, TRIP_ZOOM);
    }
    let n = camps.len() as f64;
    let (lat_sum, lng_sum) = camps.iter().fold((0.0, 0.0), |(lat, lng), pos| {
        let (pos_lat, pos_lng) = pos.to_lat_lng_deg();
        (lat + pos_lat, lng + pos_lng)
    });
    let center = MapPoint::from_lat_lng_deg(lat_sum / n, lng_sum / n);
    let zoom = if camps.len() == 1 {
        SINGLE_CAMP_ZOOM
    } else {
        MULTI_CAMP_ZOOM
    };
    (center, zoom)
}

fn plan_overview(settings: &MapSettings, dataset: &Dataset, trip: Trip) -> PagePlan {
    let mut map = MapPlan::new(trip.name.clone(), trip.center, OVERVIEW_ZOOM);
    map.layer_control = false;
    let mut points = FitPoints::seeded(trip.center);

    let mut homes = Layer::new("🏠 Startorte", false);
    for home in &dataset.homes {
        homes.markers.push(Marker {
            pos: home.pos,
            tooltip: None,
            popup: Some(escape_html(&home.name)),
            icon: image_icon(HOME_ICON_URL),
        });
        points.push(home.pos);
    }
    map.layers.push(homes);

    map.markers.push(Marker {
        pos: trip.center,
        tooltip: None,
        popup: None,
        icon: Icon::Label {
            html: escape_html(&trip.name),
        },
    });
    let mut dest = Layer::new("📍 Ziel", false);
    dest.markers.push(Marker {
        pos: trip.center,
        tooltip: None,
        popup: Some(escape_html(&trip.name)),
        icon: image_icon(DEST_ICON_URL),
    });
    map.layers.push(dest);

    let bbox = points.bbox();
    let fit = ViewportFit {
        bbox,
        max_zoom: OVERVIEW_FIT_MAX_ZOOM,
        padding_px: settings.padding_px,
    };
    apply_viewport(&mut map, fit, settings.refit.clone());
    let refit = ViewportFit {
        bbox,
        max_zoom: OVERVIEW_REFIT_MAX_ZOOM,
        padding_px: OVERVIEW_REFIT_PADDING_PX,
    };
    map.refit = Some(PendingRefit::new(refit, settings.refit.clone()));
    map.key = OVERVIEW_MAP_KEY.to_string();

    PagePlan {
        page: Page::Overview,
        trip,
        map,
        places: vec![],
        hikes: vec![],
        failed_places: vec![],
        failed_tracks: vec![],
    }
}

struct PlaceStyle {
    layer: &'static str,
    clustered: bool,
    icon: Icon,
}

impl PlaceStyle {
    fn of(kind: PlaceKind) -> Self {
        match kind {
            PlaceKind::Camping => Self {
                layer: "🏕️ Camping",
                clustered: false,
                icon: image_icon(CAMP_ICON_URL),
            },
            PlaceKind::Bakery => Self {
                layer: "🥐 Bakeries",
                clustered: true,
                icon: glyph_icon("coffee", "fa", "orange"),
            },
            PlaceKind::Supermarket => Self {
                layer: "🛒 Supermarkets",
                clustered: true,
                icon: glyph_icon("shopping-basket", "fa", "blue"),
            },
            PlaceKind::Restaurant => Self {
                layer: "🍴 Restaurants",
                clustered: true,
                icon: glyph_icon("cutlery", "fa", "red"),
            },
            PlaceKind::Poi => Self {
                layer: "📌 POIs",
                clustered: true,
                icon: glyph_icon("info-sign", "glyphicon", "blue"),
            },
        }
    }

    fn marker(&self, place: &Place, pos: MapPoint) -> Marker {
        let popup = if place.kind == PlaceKind::Camping {
            format!("<b>{}</b>", escape_html(&place.name))
        } else {
            place_popup(place)
        };
        Marker {
            pos,
            tooltip: Some(place.name.clone()),
            popup: Some(popup),
            icon: self.icon.clone(),
        }
    }
}

fn image_icon(url: &str) -> Icon {
    Icon::Image {
        url: url.to_string(),
        size: IMAGE_ICON_SIZE,
        anchor: IMAGE_ICON_ANCHOR,
    }
}

fn glyph_icon(name: &str, prefix: &str, color: &str) -> Icon {
    Icon::Glyph {
        name: name.to_string(),
        prefix: prefix.to_string(),
        color: color.to_string(),
    }
}

fn place_popup(place: &Place) -> String {
    format!(
        "<div style='max-width:260px'><b>{}</b><br>\
         <span style='font-size:12px'>{}</span><br>\
         <a href='{}' target='_blank'>📍 Auf Google Maps öffnen</a></div>",
        escape_html(&place.name),
        escape_html(place.description.as_deref().unwrap_or_default()),
        escape_html(place.link.as_deref().unwrap_or("#")),
    )
}

fn hike_popup(hike: &Hike) -> String {
    format!(
        "<b>{}</b><br>{}<br><a href='{}' target='_blank'>🔗 Hike Info</a>",
        escape_html(&hike.name),
        escape_html(hike.duration.as_deref().unwrap_or_default()),
        escape_html(hike.link.as_deref().unwrap_or("#")),
    )
}
