use crate::config::{self, GeocodingGateway};
use anyhow::Result;
use ausflug_core::gateways::geocode::GeoCodingGateway;
use ausflug_gateways::{leaflet::Leaflet, nominatim::Nominatim, opencage::OpenCage};

pub fn geocoding_gateway(cfg: &config::Geocoding) -> Result<GeoCoder> {
    let gw = match &cfg.gateway {
        Some(GeocodingGateway::Nominatim {
            endpoint,
            user_agent,
            timeout,
        }) => {
            log::info!("Use Nominatim geocoding gateway ({endpoint})");
            GeoCoder::new(Nominatim::new(endpoint, user_agent, *timeout)?)
        }
        Some(GeocodingGateway::OpenCage { api_key }) => {
            log::info!("Use OpenCage geocoding gateway");
            GeoCoder::new(OpenCage::new(api_key.clone()))
        }
        None => {
            log::warn!("No geocoding gateway configured");
            GeoCoder::new(DummyGeoCoder)
        }
    };
    Ok(gw)
}

pub fn map_renderer(cfg: &config::Map) -> Leaflet {
    Leaflet {
        height_px: cfg.height_px,
        ..Default::default()
    }
}

struct DummyGeoCoder;

impl GeoCodingGateway for DummyGeoCoder {
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)> {
        log::debug!("Cannot resolve '{addr}' because no geocoding gateway was configured");
        None
    }
}

pub struct GeoCoder(Box<dyn GeoCodingGateway + Send + Sync + 'static>);

impl GeoCoder {
    pub fn new<G>(gw: G) -> Self
    where
        G: GeoCodingGateway + Send + Sync + 'static,
    {
        Self(Box::new(gw))
    }
}

impl GeoCodingGateway for GeoCoder {
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)> {
        self.0.resolve_address_lat_lng(addr)
    }
}
