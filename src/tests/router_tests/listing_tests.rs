use super::{body_string, context, leaked_api, request};
use crate::api::INIT_DATA_HEADER;
use crate::router::handle;
use crate::tests::utils::GOOD_INIT_DATA;
use http::Method;

#[test]
fn detail_page_renders_listing() {
    let ctx = context(leaked_api());

    let resp = handle(request(Method::GET, "/listings/2"), &ctx).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("ИЩУ РАБОТУ"));
    assert!(body.contains("https://t.me/someone"));
}

#[test]
fn detail_fragment_for_htmx() {
    let ctx = context(leaked_api());
    let mut req = request(Method::GET, "/listings/1");
    req.headers_mut()
        .insert("HX-Request", "true".parse().unwrap());

    let body = body_string(handle(req, &ctx).unwrap());

    assert!(body.contains("ЗАДАЧА"));
    assert!(!body.contains("<html"));
}

#[test]
fn missing_and_malformed_ids() {
    let ctx = context(leaked_api());

    let err = handle(request(Method::GET, "/listings/99"), &ctx).unwrap_err();
    assert_eq!(err.status(), 404);

    let err = handle(request(Method::GET, "/listings/abc"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn my_listings_without_init_data_is_unauthorized() {
    let api = leaked_api();
    let ctx = context(api);

    let err = handle(request(Method::GET, "/my"), &ctx).unwrap_err();

    assert_eq!(err.status(), 401);
    assert_eq!(api.count("my_listings"), 0);
}

#[test]
fn my_listings_with_init_data() {
    let ctx = context(leaked_api());
    let mut req = request(Method::GET, "/my?tab=tasks");
    req.headers_mut()
        .insert(INIT_DATA_HEADER, GOOD_INIT_DATA.parse().unwrap());

    let body = body_string(handle(req, &ctx).unwrap());

    assert!(body.contains("Мои объявления"));
    assert!(body.contains("Собрать шкаф"));
    assert!(!body.contains("Покрасить забор"));
    assert!(body.contains(r#"hx-delete="/listings/3""#));
}

#[test]
fn owner_can_delete() {
    let api = leaked_api();
    let ctx = context(api);
    let mut req = request(Method::DELETE, "/listings/3");
    req.headers_mut()
        .insert(INIT_DATA_HEADER, GOOD_INIT_DATA.parse().unwrap());

    let resp = handle(req, &ctx).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(api.stored().iter().all(|l| l.id != 3));
}

#[test]
fn delete_with_forged_init_data_is_refused() {
    let api = leaked_api();
    let ctx = context(api);
    let mut req = request(Method::DELETE, "/listings/3");
    req.headers_mut()
        .insert(INIT_DATA_HEADER, "hash=forged".parse().unwrap());

    let err = handle(req, &ctx).unwrap_err();

    assert_eq!(err.status(), 401);
    assert_eq!(api.stored().len(), 3);
}

fn form_post(body: &str) -> astra::Request {
    http::Request::builder()
        .method(Method::POST)
        .uri("/listings")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(astra::Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

#[test]
fn form_post_publishes_listing() {
    let api = leaked_api();
    let ctx = context(api);
    let body = "kind=task&lat=53.9&lng=27.56&title=%D0%97%D0%B0%D0%B1%D0%BE%D1%80\
                &description=20+m&address=&payment=amount&amount=100&unit=BYN&contacts=%40me";

    let resp = handle(form_post(body), &ctx).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Задача опубликована!"));

    let stored = api.stored().pop().unwrap();
    assert_eq!(stored.id, 4);
    assert_eq!(stored.title, "Забор");
    assert_eq!(stored.payment, "100 BYN");
    assert_eq!(stored.address, "Минск, координаты: 53.900000, 27.560000");
    assert_eq!(api.count("create_listing"), 1);
}

#[test]
fn form_post_rejects_incomplete_forms() {
    let api = leaked_api();
    let ctx = context(api);

    let err = handle(form_post("kind=task&lat=53.9&lng=27.5&title=&description=x"), &ctx)
        .unwrap_err();
    assert_eq!(err.status(), 400);

    let err = handle(form_post("kind=task&title=a&description=b&contacts=c"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);

    let err = handle(form_post("kind=car&lat=53.9&lng=27.5"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);

    assert_eq!(api.count("create_listing"), 0);
}
