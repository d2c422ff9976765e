/// Forward geocoding of free-text addresses.
///
/// Implementations must never fail loudly: network errors,
/// empty results and malformed responses are all reported as `None`.
pub trait GeoCodingGateway {
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)>;
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)> {
        (**self).resolve_address_lat_lng(addr)
    }
}

impl<G> GeoCodingGateway for Box<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address_lat_lng(&self, addr: &str) -> Option<(f64, f64)> {
        (**self).resolve_address_lat_lng(addr)
    }
}
