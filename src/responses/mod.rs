pub mod errors;
pub mod html;
pub mod json;

pub use errors::ResultResp;

// Normal HTML response
pub use html::{empty_response, html_response};
pub use json::{json_error_response, json_response};
