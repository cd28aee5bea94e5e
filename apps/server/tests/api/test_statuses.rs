//! Configurable statuses and the reserved UNTESTED sentinel.

use actix_web::http::Method;
use serde_json::json;

use super::fake_gateway::{ORG_A, OTHER_ORG_WRITER, TESTER, WRITER};
use super::test_helpers::*;

#[actix_rt::test]
async fn test_list_excludes_untested() {
    let (_gateway, app) = seeded_app().await;

    let (status, body) = get_json(&app, &format!("/api/statuses?userId={}", TESTER)).await;

    assert_eq!(status, 200);
    let names: Vec<&str> = body["statuses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["status_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["PASS", "FAIL", "BLOCKED"]);
}

#[actix_rt::test]
async fn test_untested_is_reserved() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/statuses",
        json!({"userId": WRITER, "name": "untested", "colorHex": "#000000"}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(error_message(&body), "UNTESTED is a reserved status");

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/statuses/UNTESTED",
        json!({"userId": WRITER, "colorHex": "#000000"}),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = delete(&app, &format!("/api/statuses/UNTESTED?userId={}", WRITER)).await;
    assert_eq!(status, 400);

    assert!(gateway.calls().is_empty());
}

#[actix_rt::test]
async fn test_color_is_validated() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/statuses",
        json!({"userId": WRITER, "name": "RETEST", "colorHex": "orange"}),
    )
    .await;

    assert_eq!(status, 400);
    assert!(error_message(&body).starts_with("colorHex must look like"));
    assert!(gateway.calls().is_empty());
}

#[actix_rt::test]
async fn test_status_lifecycle() {
    let (gateway, app) = seeded_app().await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/statuses",
        json!({"userId": WRITER, "name": "RETEST", "colorHex": "#6366f1"}),
    )
    .await;
    assert_eq!(status, 200);

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/statuses/RETEST",
        json!({"userId": WRITER, "colorHex": "#4f46e5"}),
    )
    .await;
    assert_eq!(status, 200);

    let color = |g: &super::fake_gateway::FakeGateway| {
        g.snapshot()
            .statuses
            .iter()
            .find(|s| s.organization_id == ORG_A && s.status_name == "RETEST")
            .map(|s| s.color_hex.clone())
    };
    assert_eq!(color(&gateway).as_deref(), Some("#4f46e5"));

    let (status, _) = send_json(
        &app,
        Method::DELETE,
        "/api/statuses/RETEST",
        json!({"userId": WRITER}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(color(&gateway), None);
}

#[actix_rt::test]
async fn test_statuses_are_per_organization() {
    let (gateway, app) = seeded_app().await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/statuses",
        json!({"userId": OTHER_ORG_WRITER, "name": "FAIL", "colorHex": "#dc2626"}),
    )
    .await;
    assert_eq!(status, 200);

    let (_, body) = get_json(&app, &format!("/api/statuses?userId={}", WRITER)).await;
    let fail = body["statuses"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["status_name"] == "FAIL")
        .unwrap()
        .clone();
    assert_eq!(fail["color_hex"], "#ef4444");
    assert_eq!(gateway.snapshot().statuses.len(), 7);
}

#[actix_rt::test]
async fn test_tester_cannot_manage_statuses() {
    let (gateway, app) = seeded_app().await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/statuses",
        json!({"userId": TESTER, "name": "RETEST", "colorHex": "#6366f1"}),
    )
    .await;

    assert_eq!(status, 403);
    assert!(gateway.mutating_calls().is_empty());
}

#[actix_rt::test]
async fn test_duplicate_status_passes_store_message() {
    let (_gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/statuses",
        json!({"userId": WRITER, "name": "PASS", "colorHex": "#22c55e"}),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(
        error_message(&body),
        "Duplicate entry 'PASS' for key 'statuses.name'"
    );
}
