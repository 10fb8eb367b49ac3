use super::{body_string, context, leaked_api, request};
use crate::router::handle;
use http::Method;

#[test]
fn board_defaults_to_tasks() {
    let ctx = context(leaked_api());

    let resp = handle(request(Method::GET, "/board"), &ctx).expect("board renders");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Доска объявлений"));
    assert!(body.contains("Покрасить забор"));
    assert!(body.contains("Собрать шкаф"));
    assert!(!body.contains("Электрик"));
}

#[test]
fn board_applies_payment_floor_and_search() {
    let ctx = context(leaked_api());

    let body = body_string(
        handle(request(Method::GET, "/board?category=tasks&min_payment=50"), &ctx).unwrap(),
    );
    assert!(body.contains("Покрасить забор"));
    assert!(!body.contains("Собрать шкаф"), "negotiable has no amount");

    let body = body_string(
        handle(
            request(Method::GET, "/board?category=workers&search=%D0%AD%D0%9B%D0%95%D0%9A"),
            &ctx,
        )
        .unwrap(),
    );
    assert!(body.contains("Электрик"));
    assert!(body.contains(r#"value="ЭЛЕК""#), "input is echoed back");
}

#[test]
fn board_shows_empty_state() {
    let ctx = context(leaked_api());

    let body = body_string(
        handle(request(Method::GET, "/board?min_payment=1000"), &ctx).unwrap(),
    );
    assert!(body.contains("Нет объявлений"));
}

#[test]
fn unknown_category_is_a_bad_request() {
    let ctx = context(leaked_api());

    let err = handle(request(Method::GET, "/board?category=cars"), &ctx).unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn backend_outage_is_a_gateway_error() {
    let api = leaked_api();
    api.fail("list_listings", crate::api::ApiError::Network("refused".into()));
    let ctx = context(api);

    let err = handle(request(Method::GET, "/board"), &ctx).unwrap_err();
    assert_eq!(err.status(), 502);
}
