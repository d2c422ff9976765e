use ausflug_core::gateways::geocode::GeoCodingGateway;
use geocoding::{Forward, Opencage as OpencageClient, Point};

#[derive(Debug, Clone)]
pub struct OpenCage {
    api_key: Option<String>,
}

impl OpenCage {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            log::warn!("No OpenCage API key found");
        }
        Self { api_key }
    }
}

impl GeoCodingGateway for OpenCage {
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)> {
        let api_key = self.api_key.as_ref()?;
        let client = OpencageClient::new(api_key.clone());
        let res: Vec<Point<f64>> = match client.forward(addr) {
            Ok(res) => res,
            Err(err) => {
                log::warn!("Failed to resolve address location '{addr}': {err}");
                return None;
            }
        };
        let point = res.first()?;
        log::debug!("Resolved address location '{addr}': {point:?}");
        Some((point.y(), point.x()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_lookup_without_api_key() {
        let gw = OpenCage::new(None);
        assert_eq!(gw.resolve_address_lat_lng("Marktplatz 1, Bad Urach"), None);
    }
}
