pub mod filter;
pub mod listing;
pub mod payment;

pub use filter::{apply, Category, FilterCriteria, FilterInput};
pub use listing::{contact_link, Coordinates, Listing, ListingId, ListingKind, NewListing};
pub use payment::PaymentTerms;
