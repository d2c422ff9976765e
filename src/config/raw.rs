use duration_str::{deserialize_duration, deserialize_option_duration};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("ausflug.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub map: Option<Map>,
    pub tracks: Option<Tracks>,
    pub dataset: Option<Dataset>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub min_delay: Duration,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub cache_ttl: Option<Duration>,
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default().geocoding.expect("Geocoding configuration")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Nominatim,
    Opencage,
}

impl GeocodingGateway {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
            Self::Opencage => "opencage",
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub nominatim: Option<Nominatim>,
    pub opencage: Option<OpenCage>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nominatim {
    pub endpoint: Option<String>,
    pub user_agent: String,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpenCage {
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub max_zoom: u8,
    pub single_point_max_zoom: u8,
    pub padding: u16,
    pub refit_delays_ms: Vec<u64>,
    pub height: u16,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Tracks {
    pub dir: PathBuf,
}

impl Default for Tracks {
    fn default() -> Self {
        Config::default().tracks.expect("Tracks configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Dataset {
    pub file: Option<PathBuf>,
}
