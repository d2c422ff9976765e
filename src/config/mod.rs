use anyhow::{anyhow, bail, Result};
use ausflug_core::{
    usecases::MapSettings,
    viewport::{RefitSchedule, ZoomLimits},
};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "ausflug.toml";

const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";

#[derive(Debug)]
pub struct Config {
    pub geocoding: Geocoding,
    pub map: Map,
    pub tracks: Tracks,
    pub dataset: Dataset,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(key) = env::var(ENV_NAME_OPENCAGE_API_KEY) {
            cfg.geocoding.set_opencage_api_key(key);
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
    /// Minimum delay between two lookups
    pub min_delay: Duration,
    pub cache_ttl: Option<Duration>,
}

impl Geocoding {
    fn set_opencage_api_key(&mut self, key: String) {
        if let Some(GeocodingGateway::OpenCage { api_key }) = &mut self.gateway {
            *api_key = Some(key);
        }
    }
}

#[derive(Debug, Clone)]
pub enum GeocodingGateway {
    Nominatim {
        endpoint: String,
        user_agent: String,
        timeout: Duration,
    },
    OpenCage {
        api_key: Option<String>,
    },
}

#[derive(Debug)]
pub struct Map {
    pub settings: MapSettings,
    pub height_px: u16,
}

#[derive(Debug)]
pub struct Tracks {
    /// Base directory of the track files
    pub dir: PathBuf,
}

#[derive(Debug)]
pub struct Dataset {
    /// Replaces the built-in dataset.
    pub file: Option<PathBuf>,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            map,
            tracks,
            dataset,
        } = from;

        let raw::Geocoding {
            gateway: gw_name,
            min_delay,
            cache_ttl,
        } = geocoding.unwrap_or_default();

        let geo_gateway = match gw_name {
            Some(gw_name) => {
                let toml_name = gw_name.name();
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::GeocodingGateway::Nominatim => {
                        let raw::Nominatim {
                            endpoint,
                            user_agent,
                            timeout,
                        } = gateway.nominatim.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        if user_agent.trim().is_empty() {
                            bail!("The '{toml_name}' gateway requires a user agent");
                        }
                        let endpoint = endpoint.unwrap_or_else(|| {
                            ausflug_gateways::nominatim::DEFAULT_ENDPOINT.to_string()
                        });
                        let timeout =
                            timeout.unwrap_or(ausflug_gateways::nominatim::DEFAULT_TIMEOUT);
                        GeocodingGateway::Nominatim {
                            endpoint,
                            user_agent,
                            timeout,
                        }
                    }
                    raw::GeocodingGateway::Opencage => {
                        let api_key = gateway
                            .opencage
                            .and_then(|raw::OpenCage { api_key }| api_key)
                            .filter(|key| !key.trim().is_empty());
                        GeocodingGateway::OpenCage { api_key }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
            min_delay,
            cache_ttl,
        };

        let raw::Map {
            max_zoom,
            single_point_max_zoom,
            padding,
            refit_delays_ms,
            height,
        } = map.unwrap_or_default();
        if single_point_max_zoom > max_zoom {
            bail!("The single point zoom limit ({single_point_max_zoom}) exceeds the max. zoom ({max_zoom})");
        }
        let refit = RefitSchedule::new(
            refit_delays_ms
                .into_iter()
                .map(Duration::from_millis)
                .collect(),
        );
        let map = Map {
            settings: MapSettings {
                zoom: ZoomLimits {
                    max_zoom,
                    single_point_max_zoom,
                },
                padding_px: padding,
                refit,
            },
            height_px: height,
        };

        let raw::Tracks { dir } = tracks.unwrap_or_default();
        let tracks = Tracks { dir };

        let raw::Dataset { file } = dataset.unwrap_or_default();
        let dataset = Dataset { file };

        Ok(Self {
            geocoding,
            map,
            tracks,
            dataset,
        })
    }
}
