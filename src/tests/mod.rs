mod router_tests;
pub mod utils;
