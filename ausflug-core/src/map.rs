//! A renderer agnostic description of an interactive map.

use crate::viewport::{PendingRefit, Viewport, ViewportFit};
use ausflug_entities::geo::MapPoint;
use strum::IntoStaticStr;

/// Map controls besides zoom and the layer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Control {
    Fullscreen,
    Locate,
    Measure,
    MiniMap,
    MousePosition,
}

pub const DEFAULT_CONTROLS: [Control; 5] = [
    Control::Fullscreen,
    Control::Locate,
    Control::Measure,
    Control::MiniMap,
    Control::MousePosition,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// An image loaded from an URL.
    Image {
        url: String,
        size: (u16, u16),
        anchor: (u16, u16),
    },
    /// A glyph of an icon font on a colored marker.
    Glyph {
        name: String,
        prefix: String,
        color: String,
    },
    /// Plain HTML next to the position, e.g. a text label.
    Label { html: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub pos: MapPoint,
    pub tooltip: Option<String>,
    /// HTML content
    pub popup: Option<String>,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub lines: Vec<Vec<MapPoint>>,
    pub color: String,
    pub weight: u8,
    /// HTML content
    pub popup: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub clustered: bool,
    pub markers: Vec<Marker>,
    pub polylines: Vec<Polyline>,
    /// Nested layers that can be toggled one by one.
    pub children: Vec<Layer>,
}

impl Layer {
    pub fn new(name: impl Into<String>, clustered: bool) -> Self {
        Self {
            name: name.into(),
            clustered,
            markers: vec![],
            polylines: vec![],
            children: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPlan {
    /// Identity of the rendered widget within a session.
    pub key: String,
    pub title: String,
    pub center: MapPoint,
    pub zoom: u8,
    pub layers: Vec<Layer>,
    /// Markers that are not part of any toggleable layer.
    pub markers: Vec<Marker>,
    pub layer_control: bool,
    pub controls: Vec<Control>,
    pub fit: Option<ViewportFit>,
    pub refit: Option<PendingRefit>,
}

impl MapPlan {
    pub fn new(title: impl Into<String>, center: MapPoint, zoom: u8) -> Self {
        Self {
            key: String::new(),
            title: title.into(),
            center,
            zoom,
            layers: vec![],
            markers: vec![],
            layer_control: true,
            controls: DEFAULT_CONTROLS.to_vec(),
            fit: None,
            refit: None,
        }
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len() + self.layers.iter().map(|l| l.markers.len()).sum::<usize>()
    }
}

impl Viewport for MapPlan {
    fn fit_bounds(&mut self, fit: &ViewportFit) {
        self.fit = Some(*fit);
    }
}

/// Escape text for embedding into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_popup_text() {
        assert_eq!(
            escape_html("Café <b>\"Lagerhaus\"</b> & Co's"),
            "Café &lt;b&gt;&quot;Lagerhaus&quot;&lt;/b&gt; &amp; Co&#x27;s"
        );
    }

    #[test]
    fn count_markers_of_all_layers() {
        let pos = MapPoint::from_lat_lng_deg(47.7452, 8.9669);
        let marker = Marker {
            pos,
            tooltip: None,
            popup: None,
            icon: Icon::Label {
                html: "Radolfzell".into(),
            },
        };
        let mut map = MapPlan::new("Radolfzell", pos, 10);
        map.markers.push(marker.clone());
        let mut camping = Layer::new("Camping", false);
        camping.markers.push(marker);
        map.layers.push(camping);
        assert_eq!(map.marker_count(), 2);
    }

    #[test]
    fn all_default_controls_are_enabled() {
        let map = MapPlan::new("Bad Urach", MapPoint::from_lat_lng_deg(48.49, 9.40), 10);
        let names: Vec<&str> = map.controls.iter().map(|&c| c.into()).collect();
        assert_eq!(
            names,
            ["fullscreen", "locate", "measure", "mini_map", "mouse_position"]
        );
    }
}
