//! Test run API handlers.

use actix_web::{web, HttpResponse};
use tracing::info;

use super::Gateway;
use crate::auth::{delete_actor_id, ActingUser, QueryActor};
use crate::db::procedures;
use crate::error::AppResult;
use crate::models::{
    optional_text, require_user_id, required_text, ActorBody, ActorParams, CreatedResponse,
    OkResponse, RunCaseUpdateRequest, RunCasesResponse, RunSummariesResponse, RunSummaryResponse,
    TestRunRequest, TestRunsResponse,
};
use crate::services::test_runs::{self, TestRunDraft};

/// List a project's test runs.
#[utoipa::path(
    get,
    path = "/api/projects/{id}/test-runs",
    tag = "Test Runs",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Test runs", body = TestRunsResponse),
        (status = 403, description = "Another organization's project", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_test_runs(
    gateway: Gateway,
    path: web::Path<i64>,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let QueryActor(actor) = actor;
    actor.project(gateway.get_ref(), project_id).await?;

    let test_runs = gateway
        .invoke(procedures::list_test_runs(actor.user_id, project_id))
        .await?;

    Ok(HttpResponse::Ok().json(TestRunsResponse {
        ok: true,
        test_runs,
    }))
}

/// Create a test run over a list of the project's test cases.
///
/// Every listed case starts UNTESTED. The run and its cases are written in
/// one transaction.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/test-runs",
    tag = "Test Runs",
    params(("id" = i64, Path, description = "Project id")),
    request_body = TestRunRequest,
    responses(
        (status = 200, description = "Test run created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
        (status = 500, description = "Write aborted and rolled back", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_test_run(
    gateway: Gateway,
    path: web::Path<i64>,
    body: web::Json<TestRunRequest>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let body = body.into_inner();
    let user_id = require_user_id(body.user_id)?;
    let draft = TestRunDraft::from_request(body)?;

    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    actor.project(gateway.get_ref(), project_id).await?;
    actor.colleague(gateway.get_ref(), draft.tester_id).await?;
    test_runs::ensure_cases_in_project(
        gateway.get_ref(),
        actor.user_id,
        project_id,
        &draft.test_case_ids,
    )
    .await?;

    let id = test_runs::create(gateway.get_ref(), actor.user_id, project_id, &draft).await?;

    Ok(HttpResponse::Ok().json(CreatedResponse { ok: true, id: Some(id) }))
}

/// Progress cards for every run of a project.
#[utoipa::path(
    get,
    path = "/api/projects/{id}/test-runs/summaries",
    tag = "Test Runs",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "One summary per run", body = RunSummariesResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn project_run_summaries(
    gateway: Gateway,
    path: web::Path<i64>,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let QueryActor(actor) = actor;
    actor.project(gateway.get_ref(), project_id).await?;

    let summaries =
        test_runs::project_summaries(gateway.get_ref(), actor.user_id, project_id).await?;

    Ok(HttpResponse::Ok().json(RunSummariesResponse {
        ok: true,
        summaries,
    }))
}

/// Edit a test run. The submitted case list replaces the existing one and
/// every case restarts UNTESTED.
#[utoipa::path(
    put,
    path = "/api/test-runs/{id}",
    tag = "Test Runs",
    params(("id" = i64, Path, description = "Test run id")),
    request_body = TestRunRequest,
    responses(
        (status = 200, description = "Test run updated", body = OkResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Write aborted and rolled back", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_test_run(
    gateway: Gateway,
    path: web::Path<i64>,
    body: web::Json<TestRunRequest>,
) -> AppResult<HttpResponse> {
    let test_run_id = path.into_inner();
    let body = body.into_inner();
    let user_id = require_user_id(body.user_id)?;
    let draft = TestRunDraft::from_request(body)?;

    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    let scope = actor.test_run(gateway.get_ref(), test_run_id).await?;
    actor.colleague(gateway.get_ref(), draft.tester_id).await?;
    test_runs::ensure_cases_in_project(
        gateway.get_ref(),
        actor.user_id,
        scope.project_id,
        &draft.test_case_ids,
    )
    .await?;

    test_runs::update(gateway.get_ref(), actor.user_id, test_run_id, &draft).await?;

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Delete a test run.
#[utoipa::path(
    delete,
    path = "/api/test-runs/{id}",
    tag = "Test Runs",
    params(
        ("id" = i64, Path, description = "Test run id"),
        ("userId" = Option<i64>, Query, description = "Acting user, when not in the body")
    ),
    responses(
        (status = 200, description = "Test run deleted", body = OkResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_test_run(
    gateway: Gateway,
    path: web::Path<i64>,
    query: web::Query<ActorParams>,
    body: Option<web::Json<ActorBody>>,
) -> AppResult<HttpResponse> {
    let test_run_id = path.into_inner();
    let user_id = delete_actor_id(&query, body.as_deref())?;
    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    actor.test_run(gateway.get_ref(), test_run_id).await?;

    gateway
        .invoke(procedures::delete_test_run(actor.user_id, test_run_id))
        .await?;

    info!(test_run_id, "Test run deleted");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Cases of a run with their current status and notes.
#[utoipa::path(
    get,
    path = "/api/test-runs/{id}/cases",
    tag = "Test Runs",
    params(
        ("id" = i64, Path, description = "Test run id"),
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Run cases", body = RunCasesResponse),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_run_cases(
    gateway: Gateway,
    path: web::Path<i64>,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let test_run_id = path.into_inner();
    let QueryActor(actor) = actor;
    actor.test_run(gateway.get_ref(), test_run_id).await?;

    let run_cases = gateway
        .invoke(procedures::list_test_run_cases(actor.user_id, test_run_id))
        .await?;

    Ok(HttpResponse::Ok().json(RunCasesResponse {
        ok: true,
        run_cases,
    }))
}

/// Record the result of one case in a run. Any member of the organization
/// may execute.
#[utoipa::path(
    put,
    path = "/api/test-runs/{id}/cases/{case_id}",
    tag = "Test Runs",
    params(
        ("id" = i64, Path, description = "Test run id"),
        ("case_id" = i64, Path, description = "Test case id")
    ),
    request_body = RunCaseUpdateRequest,
    responses(
        (status = 200, description = "Result recorded", body = OkResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Another organization's run", body = crate::error::ErrorResponse),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_run_case(
    gateway: Gateway,
    path: web::Path<(i64, i64)>,
    body: web::Json<RunCaseUpdateRequest>,
) -> AppResult<HttpResponse> {
    let (test_run_id, test_case_id) = path.into_inner();
    let body = body.into_inner();
    let user_id = require_user_id(body.user_id)?;
    let status = required_text(body.status, "status")?;
    let notes = optional_text(body.notes);

    let actor = ActingUser::resolve(gateway.get_ref(), user_id).await?;
    actor.test_run(gateway.get_ref(), test_run_id).await?;

    gateway
        .invoke(procedures::update_test_run_case(
            actor.user_id,
            test_run_id,
            test_case_id,
            &status,
            notes,
        ))
        .await?;

    info!(test_run_id, test_case_id, status = %status, "Run case updated");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Progress of one run, recomputed from its cases.
#[utoipa::path(
    get,
    path = "/api/test-runs/{id}/summary",
    tag = "Test Runs",
    params(
        ("id" = i64, Path, description = "Test run id"),
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Summary and progress", body = RunSummaryResponse),
        (status = 404, description = "Test run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn run_summary(
    gateway: Gateway,
    path: web::Path<i64>,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let test_run_id = path.into_inner();
    let QueryActor(actor) = actor;
    actor.test_run(gateway.get_ref(), test_run_id).await?;

    let (summary, progress) =
        test_runs::fetch_summary(gateway.get_ref(), actor.user_id, test_run_id).await?;

    Ok(HttpResponse::Ok().json(RunSummaryResponse {
        ok: true,
        summary,
        progress,
    }))
}

/// Configure test run routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{id}/test-runs")
            .route(web::get().to(list_test_runs))
            .route(web::post().to(create_test_run)),
    )
    .service(
        web::resource("/projects/{id}/test-runs/summaries")
            .route(web::get().to(project_run_summaries)),
    )
    .service(
        web::resource("/test-runs/{id}")
            .route(web::put().to(update_test_run))
            .route(web::delete().to(delete_test_run)),
    )
    .service(web::resource("/test-runs/{id}/cases").route(web::get().to(list_run_cases)))
    .service(
        web::resource("/test-runs/{id}/cases/{case_id}").route(web::put().to(update_run_case)),
    )
    .service(web::resource("/test-runs/{id}/summary").route(web::get().to(run_summary)));
}
