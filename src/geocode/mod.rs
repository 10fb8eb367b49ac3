mod nominatim;

pub use nominatim::{NominatimGeocoder, ReverseResponse};

use crate::domain::listing::Coordinates;

/// Reverse geocoding, best effort.
///
/// `None` covers every failure as well as "nothing found"; callers fall back
/// to [`fallback_address`].
pub trait Geocoder {
    fn reverse(&self, at: Coordinates) -> Option<String>;
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn reverse(&self, at: Coordinates) -> Option<String> {
        (**self).reverse(at)
    }
}

/// Address text used when the geocoder has nothing.
pub fn fallback_address(city: &str, at: Coordinates) -> String {
    format!("{city}, координаты: {:.6}, {:.6}", at.lat, at.lng)
}
