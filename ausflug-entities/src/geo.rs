#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    const DEG_MAX: f64 = 90.0;
    const DEG_MIN: f64 = -90.0;

    pub fn is_valid(self) -> bool {
        self.0 >= Self::DEG_MIN && self.0 <= Self::DEG_MAX
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let res = Self(deg.into());
        if res.is_valid() {
            Some(res)
        } else {
            None
        }
    }
}

impl std::fmt::Display for LatCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    const DEG_MAX: f64 = 180.0;
    const DEG_MIN: f64 = -180.0;

    pub fn is_valid(self) -> bool {
        self.0 >= Self::DEG_MIN && self.0 <= Self::DEG_MAX
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let res = Self(deg.into());
        debug_assert!(res.is_valid());
        res
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let res = Self(deg.into());
        if res.is_valid() {
            Some(res)
        } else {
            None
        }
    }
}

impl std::fmt::Display for LngCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_deg())
    }
}

/// A geographical location on a (flat) map in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: LatCoord,
    lng: LngCoord,
}

impl MapPoint {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_valid() && self.lng.is_valid()
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// An axis aligned bounding box given by its
/// south-west and north-east corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    /// The smallest box that contains all points.
    ///
    /// Returns `None` if there are no points at all.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = MapPoint>,
    {
        points.into_iter().fold(None, |bbox: Option<Self>, pt| {
            Some(match bbox {
                None => Self::new(pt, pt),
                Some(bbox) => bbox.extended_to(pt),
            })
        })
    }

    /// The smallest box that contains this box and the point.
    pub fn extended_to(self, pt: MapPoint) -> Self {
        let (lat, lng) = pt.to_lat_lng_deg();
        Self::new(
            MapPoint::from_lat_lng_deg(self.south().min(lat), self.west().min(lng)),
            MapPoint::from_lat_lng_deg(self.north().max(lat), self.east().max(lng)),
        )
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub const fn south(&self) -> f64 {
        self.sw.lat().to_deg()
    }

    pub const fn west(&self) -> f64 {
        self.sw.lng().to_deg()
    }

    pub const fn north(&self) -> f64 {
        self.ne.lat().to_deg()
    }

    pub const fn east(&self) -> f64 {
        self.ne.lng().to_deg()
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid() && self.ne.is_valid() && self.sw.lat() <= self.ne.lat()
    }

    /// Both corners coincide, i.e. the box has no extent.
    pub fn is_point(&self) -> bool {
        self.sw == self.ne
    }

    pub fn contains_point(&self, pt: MapPoint) -> bool {
        debug_assert!(self.is_valid());
        debug_assert!(pt.is_valid());
        if pt.lat() < self.sw.lat() || pt.lat() > self.ne.lat() {
            return false;
        }
        if self.sw.lng() <= self.ne.lng() {
            // regular (inclusive)
            pt.lng() >= self.sw.lng() && pt.lng() <= self.ne.lng()
        } else {
            // inverse (exclusive)
            !(pt.lng() > self.ne.lng() && pt.lng() < self.sw.lng())
        }
    }
}

impl std::fmt::Display for MapBbox {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{},{}", self.sw, self.ne)
    }
}
