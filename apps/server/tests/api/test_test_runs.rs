//! Test runs: atomic case lists, execution results and derived progress.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::Method;
use serde_json::{json, Value};

use testbench_lib::db::GatewayError;

use super::fake_gateway::{
    CASE_CHECKOUT, CASE_LOGIN, CASE_OTHER_ORG, CASE_REFUND, FakeGateway, OTHER_ORG_WRITER,
    PROJECT_A, PROJECT_B, TESTER, TestCase, WRITER,
};
use super::test_helpers::*;

const CASE_EXTRA: i64 = 1004;

async fn create_run<S>(app: &S, project_id: i64, cases: &[i64]) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send_json(
        app,
        Method::POST,
        &format!("/api/projects/{}/test-runs", project_id),
        json!({
            "userId": WRITER,
            "testerId": TESTER,
            "name": "Release 1.4",
            "testCaseIds": cases,
        }),
    )
    .await
}

async fn record<S>(app: &S, run: i64, case: i64, status: &str) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send_json(
        app,
        Method::PUT,
        &format!("/api/test-runs/{}/cases/{}", run, case),
        json!({"userId": TESTER, "status": status}),
    )
    .await
}

fn add_fourth_case(gateway: &FakeGateway) {
    gateway.with_store(|store| {
        store.test_cases.push(TestCase {
            test_case_id: CASE_EXTRA,
            project_id: PROJECT_A,
            title: "Apply coupon".to_string(),
            description: None,
        })
    });
}

#[actix_rt::test]
async fn test_create_starts_every_case_untested() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = create_run(&app, PROJECT_A, &[CASE_LOGIN, CASE_CHECKOUT, CASE_LOGIN]).await;

    assert_eq!(status, 200, "{}", body);
    let run = body["id"].as_i64().unwrap();
    assert_eq!(
        gateway.snapshot().run_case_statuses(run),
        vec![
            (CASE_LOGIN, "UNTESTED".to_string()),
            (CASE_CHECKOUT, "UNTESTED".to_string()),
        ]
    );
}

#[actix_rt::test]
async fn test_edit_replaces_case_list() {
    let (gateway, app) = seeded_app().await;
    let (_, body) = create_run(&app, PROJECT_A, &[CASE_LOGIN, CASE_CHECKOUT, CASE_REFUND]).await;
    let run = body["id"].as_i64().unwrap();
    let (status, _) = record(&app, run, CASE_CHECKOUT, "PASS").await;
    assert_eq!(status, 200);

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/test-runs/{}", run),
        json!({
            "userId": WRITER,
            "testerId": TESTER,
            "name": "Release 1.4 (retest)",
            "testCaseIds": [CASE_CHECKOUT, CASE_REFUND],
        }),
    )
    .await;

    assert_eq!(status, 200, "{}", body);
    assert_eq!(
        gateway.snapshot().run_case_statuses(run),
        vec![
            (CASE_CHECKOUT, "UNTESTED".to_string()),
            (CASE_REFUND, "UNTESTED".to_string()),
        ]
    );
}

#[actix_rt::test]
async fn test_summary_of_mixed_run() {
    let (gateway, app) = seeded_app().await;
    add_fourth_case(&gateway);
    let (_, body) = create_run(
        &app,
        PROJECT_A,
        &[CASE_LOGIN, CASE_CHECKOUT, CASE_REFUND, CASE_EXTRA],
    )
    .await;
    let run = body["id"].as_i64().unwrap();
    record(&app, run, CASE_LOGIN, "PASS").await;
    record(&app, run, CASE_CHECKOUT, "FAIL").await;

    let (status, body) = get_json(&app, &format!("/api/test-runs/{}/summary?userId={}", run, TESTER)).await;

    assert_eq!(status, 200);
    assert_eq!(
        body["summary"],
        json!({
            "total": 4,
            "byStatus": [
                {"name": "PASS", "color": "#22c55e", "count": 1},
                {"name": "FAIL", "color": "#ef4444", "count": 1},
                {"name": "UNTESTED", "color": null, "count": 2}
            ]
        })
    );
    assert_eq!(body["progress"], json!({"completed": 2, "percent": 50}));
}

#[actix_rt::test]
async fn test_summary_of_empty_run() {
    let (_gateway, app) = seeded_app().await;
    let (_, body) = create_run(&app, PROJECT_A, &[]).await;
    let run = body["id"].as_i64().unwrap();

    let (status, body) = get_json(&app, &format!("/api/test-runs/{}/summary?userId={}", run, WRITER)).await;

    assert_eq!(status, 200);
    assert_eq!(body["summary"], json!({"total": 0, "byStatus": []}));
    assert_eq!(body["progress"], json!({"completed": 0, "percent": 0}));
}

#[actix_rt::test]
async fn test_project_summaries_cover_every_run() {
    let (_gateway, app) = seeded_app().await;
    let (_, first) = create_run(&app, PROJECT_A, &[CASE_LOGIN, CASE_CHECKOUT]).await;
    let (_, second) = create_run(&app, PROJECT_A, &[]).await;
    let first = first["id"].as_i64().unwrap();
    let second = second["id"].as_i64().unwrap();
    record(&app, first, CASE_LOGIN, "BLOCKED").await;

    let (status, body) = get_json(
        &app,
        &format!("/api/projects/{}/test-runs/summaries?userId={}", PROJECT_A, TESTER),
    )
    .await;

    assert_eq!(status, 200);
    let summaries = body["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["testRunId"], first);
    assert_eq!(summaries[0]["summary"]["total"], 2);
    assert_eq!(summaries[0]["progress"]["percent"], 50);
    assert_eq!(summaries[1]["testRunId"], second);
    assert_eq!(summaries[1]["progress"]["percent"], 0);
}

#[actix_rt::test]
async fn test_failed_case_insert_rolls_back_run() {
    let (gateway, app) = seeded_app().await;
    gateway.fail_on(
        "add_test_run_case",
        1,
        GatewayError::procedure("Lock wait timeout exceeded"),
    );

    let (status, body) = create_run(&app, PROJECT_A, &[CASE_LOGIN, CASE_CHECKOUT, CASE_REFUND]).await;

    assert_eq!(status, 500);
    assert_eq!(
        error_message(&body),
        "add_test_run_case failed at step 3, changes rolled back: Lock wait timeout exceeded"
    );
    let store = gateway.snapshot();
    assert!(store.runs.is_empty());
    assert!(store.run_cases.is_empty());
}

#[actix_rt::test]
async fn test_failed_edit_keeps_previous_cases() {
    let (gateway, app) = seeded_app().await;
    let (_, body) = create_run(&app, PROJECT_A, &[CASE_LOGIN]).await;
    let run = body["id"].as_i64().unwrap();
    record(&app, run, CASE_LOGIN, "PASS").await;
    gateway.fail_on(
        "add_test_run_case",
        0,
        GatewayError::procedure("Lock wait timeout exceeded"),
    );

    let (status, _) = send_json(
        &app,
        Method::PUT,
        &format!("/api/test-runs/{}", run),
        json!({"userId": WRITER, "testerId": TESTER, "name": "Changed", "testCaseIds": [CASE_REFUND]}),
    )
    .await;

    assert_eq!(status, 500);
    let store = gateway.snapshot();
    assert_eq!(store.run_case_statuses(run), vec![(CASE_LOGIN, "PASS".to_string())]);
    assert_eq!(store.runs[0].name, "Release 1.4");
}

#[actix_rt::test]
async fn test_tester_must_share_organization() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/api/projects/{}/test-runs", PROJECT_A),
        json!({"userId": WRITER, "testerId": OTHER_ORG_WRITER, "name": "R", "testCaseIds": [CASE_LOGIN]}),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(error_message(&body), "User belongs to another organization");

    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/api/projects/{}/test-runs", PROJECT_A),
        json!({"userId": WRITER, "testerId": 999, "name": "R"}),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(error_message(&body), "User 999 not found");

    assert!(gateway.mutating_calls().is_empty());
}

#[actix_rt::test]
async fn test_cases_must_belong_to_project() {
    let (gateway, app) = seeded_app().await;

    let (status, body) = create_run(&app, PROJECT_A, &[CASE_LOGIN, CASE_OTHER_ORG]).await;

    assert_eq!(status, 400);
    assert_eq!(
        error_message(&body),
        format!("Test case {} does not belong to project {}", CASE_OTHER_ORG, PROJECT_A)
    );
    assert!(gateway.mutating_calls().is_empty());
}

#[actix_rt::test]
async fn test_run_validation() {
    let (gateway, app) = seeded_app().await;
    let uri = format!("/api/projects/{}/test-runs", PROJECT_A);

    let (status, body) = send_json(&app, Method::POST, &uri, json!({"userId": WRITER, "testerId": TESTER})).await;
    assert_eq!(status, 400);
    assert_eq!(error_message(&body), "name is required");

    let (status, body) = send_json(&app, Method::POST, &uri, json!({"userId": WRITER, "name": "R"})).await;
    assert_eq!(status, 400);
    assert_eq!(error_message(&body), "testerId is required");

    assert!(gateway.calls().is_empty());
}

#[actix_rt::test]
async fn test_tester_cannot_create_run() {
    let (gateway, app) = seeded_app().await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        &format!("/api/projects/{}/test-runs", PROJECT_A),
        json!({"userId": TESTER, "testerId": TESTER, "name": "Mine"}),
    )
    .await;

    assert_eq!(status, 403);
    assert!(gateway.mutating_calls().is_empty());
}

#[actix_rt::test]
async fn test_recording_results() {
    let (gateway, app) = seeded_app().await;
    let (_, body) = create_run(&app, PROJECT_A, &[CASE_LOGIN]).await;
    let run = body["id"].as_i64().unwrap();

    let (status, _) = send_json(
        &app,
        Method::PUT,
        &format!("/api/test-runs/{}/cases/{}", run, CASE_LOGIN),
        json!({"userId": TESTER, "status": "FAIL", "notes": "500 on submit"}),
    )
    .await;
    assert_eq!(status, 200);
    let store = gateway.snapshot();
    assert_eq!(store.run_cases[0].status_name, "FAIL");
    assert_eq!(store.run_cases[0].notes.as_deref(), Some("500 on submit"));

    let (status, body) = get_json(&app, &format!("/api/test-runs/{}/cases?userId={}", run, TESTER)).await;
    assert_eq!(status, 200);
    assert_eq!(body["runCases"][0]["color_hex"], "#ef4444");

    let (status, body) = record(&app, run, CASE_LOGIN, "MAYBE").await;
    assert_eq!(status, 500);
    assert_eq!(error_message(&body), "Unknown status MAYBE");

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/test-runs/{}/cases/{}", run, CASE_LOGIN),
        json!({"userId": TESTER}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(error_message(&body), "status is required");
}

#[actix_rt::test]
async fn test_other_org_run_is_forbidden() {
    let (gateway, app) = seeded_app().await;
    let (status, body) = send_json(
        &app,
        Method::POST,
        &format!("/api/projects/{}/test-runs", PROJECT_B),
        json!({"userId": OTHER_ORG_WRITER, "testerId": OTHER_ORG_WRITER, "name": "Invoices", "testCaseIds": [CASE_OTHER_ORG]}),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    let run = body["id"].as_i64().unwrap();
    gateway.clear_calls();

    let (status, body) = get_json(&app, &format!("/api/test-runs/{}/summary?userId={}", run, TESTER)).await;
    assert_eq!(status, 403);
    assert_eq!(error_message(&body), "Test run belongs to another organization");

    let (status, _) = record(&app, run, CASE_OTHER_ORG, "PASS").await;
    assert_eq!(status, 403);

    let (status, _) = delete(&app, &format!("/api/test-runs/{}?userId={}", run, WRITER)).await;
    assert_eq!(status, 403);

    assert!(gateway.mutating_calls().is_empty());
}

#[actix_rt::test]
async fn test_list_and_delete_runs() {
    let (gateway, app) = seeded_app().await;
    let (_, body) = create_run(&app, PROJECT_A, &[CASE_LOGIN, CASE_REFUND]).await;
    let run = body["id"].as_i64().unwrap();

    let (status, body) = get_json(
        &app,
        &format!("/api/projects/{}/test-runs?userId={}", PROJECT_A, TESTER),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["testRuns"][0]["test_run_id"], run);

    let (status, _) = send_json(
        &app,
        Method::DELETE,
        &format!("/api/test-runs/{}", run),
        json!({"userId": WRITER}),
    )
    .await;
    assert_eq!(status, 200);
    let store = gateway.snapshot();
    assert!(store.runs.is_empty());
    assert!(store.run_cases.is_empty());
}
