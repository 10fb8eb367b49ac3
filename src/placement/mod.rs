mod form;
mod geolocation;
mod session;

pub use form::{FormField, ListingForm};
pub use geolocation::{GeolocationError, GeolocationOptions, GEOLOCATION_OPTIONS};
pub use session::{AddressLookup, PlacementSession, PlacementState};
