//! Test case API handlers.

use actix_web::{web, HttpResponse};
use tracing::info;

use super::Gateway;
use crate::auth::{delete_actor_id, ActingUser, QueryActor};
use crate::db::procedures;
use crate::error::AppResult;
use crate::models::{
    require_user_id, ActorBody, ActorParams, CreatedResponse, OkResponse, StepsResponse,
    TestCaseRequest, TestCasesResponse,
};
use crate::services::test_cases::{self, TestCaseDraft};

/// List a project's test cases.
#[utoipa::path(
    get,
    path = "/api/projects/{id}/test-cases",
    tag = "Test Cases",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Test cases", body = TestCasesResponse),
        (status = 403, description = "Another organization's project", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_test_cases(
    gateway: Gateway,
    path: web::Path<i64>,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let QueryActor(actor) = actor;
    actor.project(gateway.get_ref(), project_id).await?;

    let test_cases = gateway
        .invoke(procedures::list_test_cases(actor.user_id, project_id))
        .await?;

    Ok(HttpResponse::Ok().json(TestCasesResponse {
        ok: true,
        test_cases,
    }))
}

/// Create a test case with its ordered steps.
///
/// The case and every step are written in one transaction.
#[utoipa::path(
    post,
    path = "/api/projects/{id}/test-cases",
    tag = "Test Cases",
    params(("id" = i64, Path, description = "Project id")),
    request_body = TestCaseRequest,
    responses(
        (status = 200, description = "Test case created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
        (status = 500, description = "Write aborted and rolled back", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_test_case(
    gateway: Gateway,
    path: web::Path<i64>,
    body: web::Json<TestCaseRequest>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let body = body.into_inner();
    let user_id = require_user_id(body.user_id)?;
    let draft = TestCaseDraft::from_request(body)?;

    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    actor.project(gateway.get_ref(), project_id).await?;

    let id = test_cases::create(gateway.get_ref(), actor.user_id, project_id, &draft).await?;

    Ok(HttpResponse::Ok().json(CreatedResponse { ok: true, id: Some(id) }))
}

/// Edit a test case. The submitted steps replace the existing ones.
#[utoipa::path(
    put,
    path = "/api/test-cases/{id}",
    tag = "Test Cases",
    params(("id" = i64, Path, description = "Test case id")),
    request_body = TestCaseRequest,
    responses(
        (status = 200, description = "Test case updated", body = OkResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Write aborted and rolled back", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_test_case(
    gateway: Gateway,
    path: web::Path<i64>,
    body: web::Json<TestCaseRequest>,
) -> AppResult<HttpResponse> {
    let test_case_id = path.into_inner();
    let body = body.into_inner();
    let user_id = require_user_id(body.user_id)?;
    let draft = TestCaseDraft::from_request(body)?;

    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    actor.test_case(gateway.get_ref(), test_case_id).await?;

    test_cases::update(gateway.get_ref(), actor.user_id, test_case_id, &draft).await?;

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Delete a test case.
#[utoipa::path(
    delete,
    path = "/api/test-cases/{id}",
    tag = "Test Cases",
    params(
        ("id" = i64, Path, description = "Test case id"),
        ("userId" = Option<i64>, Query, description = "Acting user, when not in the body")
    ),
    responses(
        (status = 200, description = "Test case deleted", body = OkResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_test_case(
    gateway: Gateway,
    path: web::Path<i64>,
    query: web::Query<ActorParams>,
    body: Option<web::Json<ActorBody>>,
) -> AppResult<HttpResponse> {
    let test_case_id = path.into_inner();
    let user_id = delete_actor_id(&query, body.as_deref())?;
    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    actor.test_case(gateway.get_ref(), test_case_id).await?;

    gateway
        .invoke(procedures::delete_test_case(actor.user_id, test_case_id))
        .await?;

    info!(test_case_id, "Test case deleted");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Ordered steps of a test case.
#[utoipa::path(
    get,
    path = "/api/test-cases/{id}/steps",
    tag = "Test Cases",
    params(
        ("id" = i64, Path, description = "Test case id"),
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Steps in order", body = StepsResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_steps(
    gateway: Gateway,
    path: web::Path<i64>,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let test_case_id = path.into_inner();
    let QueryActor(actor) = actor;
    actor.test_case(gateway.get_ref(), test_case_id).await?;

    let steps = gateway
        .invoke(procedures::list_test_steps(actor.user_id, test_case_id))
        .await?;

    Ok(HttpResponse::Ok().json(StepsResponse { ok: true, steps }))
}

/// Configure test case routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/{id}/test-cases")
            .route(web::get().to(list_test_cases))
            .route(web::post().to(create_test_case)),
    )
    .service(
        web::resource("/test-cases/{id}")
            .route(web::put().to(update_test_case))
            .route(web::delete().to(delete_test_case)),
    )
    .service(web::resource("/test-cases/{id}/steps").route(web::get().to(list_steps)));
}
