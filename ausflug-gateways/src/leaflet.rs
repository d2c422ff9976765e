//! Renders a [`MapPlan`] into a standalone Leaflet HTML page.

use anyhow::Result;
use askama::Template;
use ausflug_core::{
    entities::{MapBbox, MapPoint},
    gateways::render::MapRenderer,
    map::{escape_html, Icon, Layer, MapPlan, Marker, Polyline},
    viewport::ViewportFit,
};
use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

const DATE_TIME_FORMAT: &[FormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const DEFAULT_HEIGHT_PX: u16 = 600;

#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

impl TileLayer {
    pub fn carto_positron() -> Self {
        Self {
            url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png".into(),
            attribution: "&copy; <a href='https://www.openstreetmap.org/copyright'>OpenStreetMap</a> contributors &copy; <a href='https://carto.com/attributions'>CARTO</a>".into(),
        }
    }
}

impl Default for TileLayer {
    fn default() -> Self {
        Self::carto_positron()
    }
}

#[derive(Debug, Clone)]
pub struct Leaflet {
    pub tiles: TileLayer,
    pub height_px: u16,
}

impl Default for Leaflet {
    fn default() -> Self {
        Self {
            tiles: TileLayer::default(),
            height_px: DEFAULT_HEIGHT_PX,
        }
    }
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate<'a> {
    title: &'a str,
    key: &'a str,
    height_px: u16,
    data: &'a str,
    generated_at: &'a str,
}

impl MapRenderer for Leaflet {
    fn render(&self, plan: &MapPlan) -> Result<String> {
        let data = script_json(&MapData::new(plan, &self.tiles))?;
        let generated_at = OffsetDateTime::now_utc().format(DATE_TIME_FORMAT)?;
        let html = MapTemplate {
            title: &plan.title,
            key: &plan.key,
            height_px: self.height_px,
            data: &data,
            generated_at: &generated_at,
        }
        .render()?;
        log::debug!(
            "Rendered map '{}' with {} markers",
            plan.key,
            plan.marker_count()
        );
        Ok(html)
    }
}

/// JSON that can be embedded into a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

type LatLng = [f64; 2];

fn lat_lng(pt: MapPoint) -> LatLng {
    let (lat, lng) = pt.to_lat_lng_deg();
    [lat, lng]
}

fn bounds(bbox: &MapBbox) -> [LatLng; 2] {
    [lat_lng(bbox.southwest()), lat_lng(bbox.northeast())]
}

#[derive(Serialize)]
struct MapData<'a> {
    tiles: &'a TileLayer,
    center: LatLng,
    zoom: u8,
    layers: Vec<LayerData>,
    markers: Vec<MarkerData>,
    layer_control: bool,
    controls: Vec<&'static str>,
    fit: Option<FitData>,
    refit: Option<RefitData>,
}

#[derive(Serialize)]
struct LayerData {
    name: String,
    clustered: bool,
    markers: Vec<MarkerData>,
    polylines: Vec<PolylineData>,
    children: Vec<LayerData>,
}

#[derive(Serialize)]
struct MarkerData {
    pos: LatLng,
    tooltip: Option<String>,
    popup: Option<String>,
    icon: IconData,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IconData {
    Image {
        url: String,
        size: [u16; 2],
        anchor: [u16; 2],
    },
    Glyph {
        name: String,
        prefix: String,
        color: String,
    },
    Label {
        html: String,
    },
}

#[derive(Serialize)]
struct PolylineData {
    lines: Vec<Vec<LatLng>>,
    color: String,
    weight: u8,
    popup: Option<String>,
}

#[derive(Serialize)]
struct FitData {
    bounds: [LatLng; 2],
    max_zoom: u8,
    padding: u16,
}

#[derive(Serialize)]
struct RefitData {
    fit: FitData,
    delays_ms: Vec<u64>,
}

impl<'a> MapData<'a> {
    fn new(plan: &MapPlan, tiles: &'a TileLayer) -> Self {
        Self {
            tiles,
            center: lat_lng(plan.center),
            zoom: plan.zoom,
            layers: plan.layers.iter().map(Into::into).collect(),
            markers: plan.markers.iter().map(Into::into).collect(),
            layer_control: plan.layer_control,
            controls: plan.controls.iter().map(|&c| c.into()).collect(),
            fit: plan.fit.as_ref().map(Into::into),
            refit: plan.refit.as_ref().map(|refit| RefitData {
                fit: refit.fit().into(),
                delays_ms: refit
                    .schedule()
                    .delays()
                    .iter()
                    .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
                    .collect(),
            }),
        }
    }
}

impl From<&Layer> for LayerData {
    fn from(layer: &Layer) -> Self {
        Self {
            name: layer.name.clone(),
            clustered: layer.clustered,
            markers: layer.markers.iter().map(Into::into).collect(),
            polylines: layer.polylines.iter().map(Into::into).collect(),
            children: layer.children.iter().map(Into::into).collect(),
        }
    }
}

impl From<&Marker> for MarkerData {
    fn from(marker: &Marker) -> Self {
        Self {
            pos: lat_lng(marker.pos),
            tooltip: marker.tooltip.as_deref().map(escape_html),
            popup: marker.popup.clone(),
            icon: (&marker.icon).into(),
        }
    }
}

impl From<&Icon> for IconData {
    fn from(icon: &Icon) -> Self {
        match icon {
            Icon::Image { url, size, anchor } => Self::Image {
                url: url.clone(),
                size: [size.0, size.1],
                anchor: [anchor.0, anchor.1],
            },
            Icon::Glyph {
                name,
                prefix,
                color,
            } => Self::Glyph {
                name: name.clone(),
                prefix: prefix.clone(),
                color: color.clone(),
            },
            Icon::Label { html } => Self::Label { html: html.clone() },
        }
    }
}

impl From<&Polyline> for PolylineData {
    fn from(line: &Polyline) -> Self {
        Self {
            lines: line
                .lines
                .iter()
                .map(|l| l.iter().copied().map(lat_lng).collect())
                .collect(),
            color: line.color.clone(),
            weight: line.weight,
            popup: line.popup.clone(),
        }
    }
}

impl From<&ViewportFit> for FitData {
    fn from(fit: &ViewportFit) -> Self {
        Self {
            bounds: bounds(&fit.bbox),
            max_zoom: fit.max_zoom,
            padding: fit.padding_px,
        }
    }
}
