//! Fitting the visible region of a map to the plotted points.
//!
//! A map is frequently built while its container is not laid out
//! yet (e.g. in a hidden tab). The renderer then computes a wrong
//! viewport size, so the fit has to be applied a second time after
//! the map has been mounted. [`apply_viewport`] fits immediately and
//! returns a [`PendingRefit`] for that second pass.

use ausflug_entities::geo::{MapBbox, MapPoint};
use std::time::Duration;

pub const DEFAULT_MAX_ZOOM: u8 = 15;
pub const DEFAULT_SINGLE_POINT_MAX_ZOOM: u8 = 12;
pub const DEFAULT_PADDING_PX: u16 = 24;
pub const DEFAULT_REFIT_DELAYS_MS: [u64; 3] = [0, 200, 600];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    pub bbox: MapBbox,
    /// Upper bound for the zoom level the fit may choose.
    pub max_zoom: u8,
    pub padding_px: u16,
}

/// Something with a viewport that can be fitted to a bounding box.
pub trait Viewport {
    fn fit_bounds(&mut self, fit: &ViewportFit);
}

/// Delays after mount at which the fit is re-applied
/// if the host cannot report the mount itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefitSchedule(Vec<Duration>);

impl RefitSchedule {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self(delays)
    }

    pub fn delays(&self) -> &[Duration] {
        &self.0
    }
}

impl Default for RefitSchedule {
    fn default() -> Self {
        Self(
            DEFAULT_REFIT_DELAYS_MS
                .iter()
                .copied()
                .map(Duration::from_millis)
                .collect(),
        )
    }
}

/// The second pass of a viewport fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRefit {
    fit: ViewportFit,
    schedule: RefitSchedule,
}

impl PendingRefit {
    pub fn new(fit: ViewportFit, schedule: RefitSchedule) -> Self {
        Self { fit, schedule }
    }

    pub fn fit(&self) -> &ViewportFit {
        &self.fit
    }

    pub fn schedule(&self) -> &RefitSchedule {
        &self.schedule
    }

    /// To be called by the host as soon as the map is visible.
    pub fn on_mount<V: Viewport>(&self, map: &mut V) {
        log::debug!("Re-applying viewport fit {} after mount", self.fit.bbox);
        map.fit_bounds(&self.fit);
    }
}

/// Fit the map now and return the pass that has to follow after mount.
pub fn apply_viewport<V: Viewport>(
    map: &mut V,
    fit: ViewportFit,
    schedule: RefitSchedule,
) -> PendingRefit {
    map.fit_bounds(&fit);
    PendingRefit::new(fit, schedule)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLimits {
    pub max_zoom: u8,
    /// Applies if there is only a single point to show.
    pub single_point_max_zoom: u8,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            max_zoom: DEFAULT_MAX_ZOOM,
            single_point_max_zoom: DEFAULT_SINGLE_POINT_MAX_ZOOM,
        }
    }
}

/// Collects the points a viewport has to show.
///
/// The collection is always seeded with a fallback center
/// and therefore never empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPoints {
    bbox: MapBbox,
    count: usize,
}

impl FitPoints {
    pub fn seeded(center: MapPoint) -> Self {
        Self {
            bbox: MapBbox::new(center, center),
            count: 0,
        }
    }

    pub fn push(&mut self, pt: MapPoint) {
        self.bbox = self.bbox.extended_to(pt);
        self.count += 1;
    }

    /// Both corners of the box are added, so that e.g. a long track
    /// far away from all other markers stays in view.
    pub fn push_bbox(&mut self, bbox: &MapBbox) {
        self.push(bbox.southwest());
        self.push(bbox.northeast());
    }

    /// Number of points without the seed.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bbox(&self) -> MapBbox {
        self.bbox
    }

    pub fn max_zoom(&self, limits: ZoomLimits) -> u8 {
        if self.count <= 1 || self.bbox.is_point() {
            limits.single_point_max_zoom.min(limits.max_zoom)
        } else {
            limits.max_zoom
        }
    }

    pub fn fit(&self, limits: ZoomLimits, padding_px: u16) -> ViewportFit {
        ViewportFit {
            bbox: self.bbox,
            max_zoom: self.max_zoom(limits),
            padding_px,
        }
    }
}

impl Extend<MapPoint> for FitPoints {
    fn extend<T: IntoIterator<Item = MapPoint>>(&mut self, iter: T) {
        for pt in iter {
            self.push(pt);
        }
    }
}
