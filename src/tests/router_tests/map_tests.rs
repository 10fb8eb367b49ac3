use super::{body_string, content_type, context, leaked_api, request};
use crate::router::handle;
use crate::templates::html_error_response;
use crate::tests::utils::FakeGeocoder;
use http::Method;
use serde_json::Value;

#[test]
fn home_page_embeds_markers() {
    let ctx = context(leaked_api());

    let resp = handle(request(Method::GET, "/"), &ctx).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(r#"id="markers""#));
    assert!(body.contains(r#"data-zoom="11""#));
    assert!(body.contains("Покрасить забор"));
    assert!(!body.contains("data-focus"));
}

#[test]
fn home_page_follows_deep_link() {
    let ctx = context(leaked_api());

    let body = body_string(
        handle(request(Method::GET, "/?show=1&lat=53.9&lng=27.56&src=bot"), &ctx).unwrap(),
    );

    assert!(body.contains(r#"data-focus="1""#));
    assert!(body.contains(r#"data-zoom="15""#));
    assert!(body.contains(r#"data-clean-url="/?src=bot""#));
}

#[test]
fn markers_json_mirrors_listings() {
    let ctx = context(leaked_api());

    let resp = handle(request(Method::GET, "/markers"), &ctx).unwrap();
    assert_eq!(content_type(&resp), "application/json");

    let json: Value = serde_json::from_str(&body_string(resp)).unwrap();
    let markers = json["markers"].as_array().unwrap();
    let ids: Vec<i64> = markers
        .iter()
        .map(|m| m["listing_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(markers[1]["color"], "green");
    assert_eq!(json["viewport"]["zoom"], 11);
}

#[test]
fn markers_error_is_json() {
    let api = leaked_api();
    api.fail("list_listings", crate::api::ApiError::Network("refused".into()));
    let ctx = context(api);

    let resp = handle(request(Method::GET, "/markers"), &ctx).unwrap();

    assert_eq!(resp.status(), 502);
    let json: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert!(json["detail"].as_str().unwrap().contains("refused"));
}

#[test]
fn address_lookup_uses_geocoder_or_fallback() {
    let ctx = context(leaked_api());
    let body = body_string(handle(request(Method::GET, "/address?lat=53.9&lng=27.56"), &ctx).unwrap());
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["address"], "Минск, координаты: 53.900000, 27.560000");

    let ctx = context(leaked_api()).with_geocoder(Box::new(FakeGeocoder(Some("ул. Ленина, 1"))));
    let body = body_string(handle(request(Method::GET, "/address?lat=53.9&lng=27.56"), &ctx).unwrap());
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["address"], "ул. Ленина, 1");

    let err = handle(request(Method::GET, "/address?lat=95&lng=27"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn health_and_unknown_routes() {
    let ctx = context(leaked_api());

    let body = body_string(handle(request(Method::GET, "/health"), &ctx).unwrap());
    assert_eq!(body, r#"{"status":"ok"}"#);

    let err = handle(request(Method::GET, "/nowhere"), &ctx).unwrap_err();
    assert_eq!(err.status(), 404);

    let err = handle(request(Method::POST, "/board"), &ctx).unwrap_err();
    assert_eq!(err.status(), 404);
}

#[test]
fn errors_render_as_html_pages() {
    let resp = html_error_response(crate::errors::ServerError::NotFound);
    assert_eq!(resp.status(), 404);
    assert_eq!(content_type(&resp), "text/html; charset=utf-8");
    assert!(body_string(resp).contains("Объявление не найдено"));
}
