pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{hike_builder::*, place_builder::*};

pub mod place_builder {

    use super::*;
    use crate::{geo::*, place::*, trip::*};

    #[derive(Debug)]
    pub struct PlaceBuild {
        place: Place,
    }

    impl PlaceBuild {
        pub fn trip(mut self, id: u32) -> Self {
            self.place.trip_id = TripId::new(id);
            self
        }
        pub fn kind(mut self, kind: PlaceKind) -> Self {
            self.place.kind = kind;
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.place.name = name.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.place.address = Some(address.into());
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.place.description = Some(desc.into());
            self
        }
        pub fn link(mut self, link: &str) -> Self {
            self.place.link = Some(link.into());
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.place.pos = Some(pos);
            self
        }
        pub fn finish(self) -> Place {
            self.place
        }
    }

    impl Builder for Place {
        type Build = PlaceBuild;
        fn build() -> PlaceBuild {
            PlaceBuild {
                place: Place {
                    trip_id: TripId::new(1),
                    kind: PlaceKind::Poi,
                    name: "".into(),
                    address: None,
                    description: None,
                    link: None,
                    pos: None,
                },
            }
        }
    }
}

pub mod hike_builder {

    use super::*;
    use crate::{track::*, trip::*};

    #[derive(Debug)]
    pub struct HikeBuild {
        hike: Hike,
    }

    impl HikeBuild {
        pub fn trip(mut self, id: u32) -> Self {
            self.hike.trip_id = TripId::new(id);
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.hike.name = name.into();
            self
        }
        pub fn file(mut self, file: &str) -> Self {
            self.hike.file = file.into();
            self
        }
        pub fn duration(mut self, duration: &str) -> Self {
            self.hike.duration = Some(duration.into());
            self
        }
        pub fn link(mut self, link: &str) -> Self {
            self.hike.link = Some(link.into());
            self
        }
        pub fn finish(self) -> Hike {
            self.hike
        }
    }

    impl Builder for Hike {
        type Build = HikeBuild;
        fn build() -> HikeBuild {
            HikeBuild {
                hike: Hike {
                    trip_id: TripId::new(1),
                    name: "".into(),
                    file: "".into(),
                    duration: None,
                    link: None,
                },
            }
        }
    }
}
