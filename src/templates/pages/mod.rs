pub mod board;
pub mod detail;
pub mod home;
pub mod my_listings;

pub use board::board_page;
pub use detail::{detail_page, listing_detail};
pub use home::{home_page, HomeVm};
pub use my_listings::my_listings_page;
