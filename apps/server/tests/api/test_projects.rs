//! Project endpoints and organization scoping.

use actix_web::http::Method;
use actix_web::test;
use serde_json::json;

use super::fake_gateway::{OTHER_ORG_WRITER, PROJECT_A, PROJECT_B, TESTER, WRITER};
use super::test_helpers::*;

#[actix_rt::test]
async fn test_list_is_scoped_to_callers_org() {
    let (_gateway, app) = seeded_app().await;

    let (status, body) = get_json(&app, &format!("/api/projects?userId={}", TESTER)).await;

    assert_eq!(status, 200);
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["project_id"], PROJECT_A);
}

#[actix_rt::test]
async fn test_writer_creates_project() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/projects",
        json!({"userId": WRITER, "name": "  Mobile app ", "description": "iOS and Android"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    let id = body["id"].as_i64().unwrap();
    let store = gateway.snapshot();
    let project = store.projects.iter().find(|p| p.project_id == id).unwrap();
    assert_eq!(project.name, "Mobile app");
}

#[actix_rt::test]
async fn test_tester_cannot_create_project() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/projects",
        json!({"userId": TESTER, "name": "Nope"}),
    )
    .await;

    assert_eq!(status, 403);
    assert_eq!(error_message(&body), "Writer or admin role required");
    assert!(gateway.mutating_calls().is_empty());
}

#[actix_rt::test]
async fn test_project_field_limits() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/projects",
        json!({"userId": WRITER, "name": "n".repeat(151)}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(error_message(&body), "name must be at most 150 characters");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/projects",
        json!({"userId": WRITER, "name": "ok", "description": "d".repeat(1001)}),
    )
    .await;
    assert_eq!(status, 400);

    let (status, body) = send_json(&app, Method::POST, "/api/projects", json!({"name": "ok"})).await;
    assert_eq!(status, 400);
    assert_eq!(error_message(&body), "userId is required");

    assert!(gateway.calls().is_empty());
}

#[actix_rt::test]
async fn test_update_other_orgs_project_is_forbidden() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/projects/{}", PROJECT_B),
        json!({"userId": WRITER, "name": "Hijacked"}),
    )
    .await;

    assert_eq!(status, 403);
    assert_eq!(error_message(&body), "Project belongs to another organization");
    assert!(gateway.mutating_calls().is_empty());
    assert_eq!(
        gateway
            .snapshot()
            .projects
            .iter()
            .find(|p| p.project_id == PROJECT_B)
            .unwrap()
            .name,
        "Billing"
    );
}

#[actix_rt::test]
async fn test_update_project() {
    let (gateway, app) = seeded_app().await;

    let (status, _) = send_json(
        &app,
        Method::PUT,
        &format!("/api/projects/{}", PROJECT_A),
        json!({"userId": WRITER, "name": "Checkout v2"}),
    )
    .await;

    assert_eq!(status, 200);
    let store = gateway.snapshot();
    let project = store.projects.iter().find(|p| p.project_id == PROJECT_A).unwrap();
    assert_eq!(project.name, "Checkout v2");
    assert_eq!(project.description, None);
}

#[actix_rt::test]
async fn test_missing_project_is_404() {
    let (_gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/projects/424242",
        json!({"userId": WRITER, "name": "Ghost"}),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(error_message(&body), "Project 424242 not found");
}

#[actix_rt::test]
async fn test_delete_with_user_in_query() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = delete(
        &app,
        &format!("/api/projects/{}?userId={}", PROJECT_A, WRITER),
    )
    .await;

    assert_eq!(status, 200, "{}", body);
    let store = gateway.snapshot();
    assert!(store.projects.iter().all(|p| p.project_id != PROJECT_A));
    assert!(store.test_cases.iter().all(|c| c.project_id != PROJECT_A));
}

#[actix_rt::test]
async fn test_delete_with_user_in_body() {
    let (gateway, app) = seeded_app().await;

    let (status, _) = send_json(
        &app,
        Method::DELETE,
        &format!("/api/projects/{}", PROJECT_B),
        json!({"userId": OTHER_ORG_WRITER}),
    )
    .await;

    assert_eq!(status, 200);
    assert!(
        gateway
            .snapshot()
            .projects
            .iter()
            .all(|p| p.project_id != PROJECT_B)
    );
}

#[actix_rt::test]
async fn test_delete_without_user_is_400() {
    let (gateway, app) = seeded_app().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/projects/{}", PROJECT_A))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    assert!(gateway.calls().is_empty());
}
