mod board_tests;
mod listing_tests;
mod map_tests;

use crate::router::ServerContext;
use crate::tests::utils::{sample_listings, FakeApi};
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;

/// The context owns its backend for the whole process; tests leak one per case
/// so they can still inspect it.
fn leaked_api() -> &'static FakeApi {
    Box::leak(Box::new(FakeApi::new(sample_listings())))
}

fn context(api: &'static FakeApi) -> ServerContext {
    ServerContext::new(Box::new(api), "Минск")
}

fn request(method: Method, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

fn content_type(resp: &Response) -> &str {
    resp.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
