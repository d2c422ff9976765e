//! The static trip data: trips, homes, places and hikes.

use anyhow::{anyhow, bail, Context as _, Result};
use ausflug_core::{entities::*, usecases::Dataset};
use std::{collections::HashSet, fs, path::Path};

const BUILTIN_DATASET: &str = include_str!("trips.toml");

mod raw {
    use serde::Deserialize;
    use std::path::PathBuf;

    #[derive(Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub struct Dataset {
        pub winner: Option<u32>,
        pub trips: Vec<Trip>,
        #[serde(default)]
        pub homes: Vec<Home>,
        #[serde(default)]
        pub places: Vec<Place>,
        #[serde(default)]
        pub hikes: Vec<Hike>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub struct Trip {
        pub id: u32,
        pub name: String,
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub struct Home {
        pub name: String,
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub struct Place {
        pub trip: u32,
        pub kind: String,
        pub name: String,
        pub address: Option<String>,
        pub description: Option<String>,
        pub link: Option<String>,
        pub lat: Option<f64>,
        pub lon: Option<f64>,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub struct Hike {
        pub trip: u32,
        pub name: String,
        pub file: PathBuf,
        pub duration: Option<String>,
        pub link: Option<String>,
    }
}

/// Load the dataset from a file or fall back to the built-in one.
pub fn load(file: Option<&Path>) -> Result<Dataset> {
    match file {
        Some(file) => {
            log::info!("Loading dataset from {}", file.display());
            let toml = fs::read_to_string(file)
                .with_context(|| format!("Unable to read dataset {}", file.display()))?;
            parse(&toml).with_context(|| format!("Invalid dataset {}", file.display()))
        }
        None => parse(BUILTIN_DATASET),
    }
}

pub fn parse(toml: &str) -> Result<Dataset> {
    let raw: raw::Dataset = toml::from_str(toml)?;
    Dataset::try_from(raw)
}

impl TryFrom<raw::Dataset> for Dataset {
    type Error = anyhow::Error;
    fn try_from(from: raw::Dataset) -> Result<Self> {
        let raw::Dataset {
            winner,
            trips,
            homes,
            places,
            hikes,
        } = from;

        let mut ids = HashSet::new();
        let trips = trips
            .into_iter()
            .map(|raw::Trip { id, name, lat, lon }| {
                if !ids.insert(id) {
                    bail!("Duplicate trip {id}");
                }
                let center = map_point(lat, lon).with_context(|| format!("Trip '{name}'"))?;
                Ok(Trip {
                    id: TripId::new(id),
                    name,
                    center,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let trip_id = |id: u32| -> Result<TripId> {
            if ids.contains(&id) {
                Ok(TripId::new(id))
            } else {
                Err(anyhow!("Unknown trip {id}"))
            }
        };

        let homes = homes
            .into_iter()
            .map(|raw::Home { name, lat, lon }| {
                let pos = map_point(lat, lon).with_context(|| format!("Home '{name}'"))?;
                Ok(Home { name, pos })
            })
            .collect::<Result<Vec<_>>>()?;

        let places = places
            .into_iter()
            .map(|place| {
                let raw::Place {
                    trip,
                    kind,
                    name,
                    address,
                    description,
                    link,
                    lat,
                    lon,
                } = place;
                let context = || format!("Place '{name}'");
                let kind = kind
                    .parse::<PlaceKind>()
                    .map_err(|_| anyhow!("Unknown kind of place '{kind}'"))
                    .with_context(context)?;
                let pos = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(map_point(lat, lon).with_context(context)?),
                    (None, None) => None,
                    _ => return Err(anyhow!("Incomplete coordinates")).with_context(context),
                };
                Ok(Place {
                    trip_id: trip_id(trip).with_context(context)?,
                    kind,
                    name,
                    address,
                    description,
                    link,
                    pos,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let hikes = hikes
            .into_iter()
            .map(|hike| {
                let raw::Hike {
                    trip,
                    name,
                    file,
                    duration,
                    link,
                } = hike;
                Ok(Hike {
                    trip_id: trip_id(trip).with_context(|| format!("Hike '{name}'"))?,
                    name,
                    file,
                    duration,
                    link,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let default_trip = winner.map(trip_id).transpose()?;

        Ok(Self {
            trips,
            homes,
            places,
            hikes,
            default_trip,
        })
    }
}

fn map_point(lat: f64, lon: f64) -> Result<MapPoint> {
    MapPoint::try_from_lat_lng_deg(lat, lon).ok_or_else(|| anyhow!("Invalid position {lat},{lon}"))
}
