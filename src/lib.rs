pub mod api;
pub mod app;
pub mod config;
pub mod deeplink;
pub mod domain;
pub mod errors;
pub mod geocode;
pub mod logging;
pub mod map;
pub mod placement;
pub mod responses;
pub mod router;
pub mod store;
pub mod templates;

pub use router::{handle, ServerContext};

#[cfg(test)]
mod tests;
