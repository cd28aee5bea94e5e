//! Project API handlers.

use actix_web::{web, HttpResponse};
use tracing::info;

use super::Gateway;
use crate::auth::{delete_actor_id, ActingUser, QueryActor};
use crate::db::{procedures, rows};
use crate::error::AppResult;
use crate::models::project::{MAX_DESCRIPTION, MAX_NAME};
use crate::models::{
    check_max_len, optional_text, require_user_id, required_text, ActorBody, ActorParams,
    CreatedResponse, OkResponse, ProjectRequest, ProjectsResponse,
};

/// Validated project fields.
struct ProjectFields {
    name: String,
    description: Option<String>,
}

fn validate(req: ProjectRequest) -> AppResult<(i64, ProjectFields)> {
    let user_id = require_user_id(req.user_id)?;
    let name = required_text(req.name, "name")?;
    let description = optional_text(req.description);
    check_max_len(Some(&name), "name", MAX_NAME)?;
    check_max_len(description.as_deref(), "description", MAX_DESCRIPTION)?;
    Ok((user_id, ProjectFields { name, description }))
}

/// List the caller's organization projects.
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    params(("userId" = i64, Query, description = "Acting user")),
    responses(
        (status = 200, description = "Projects", body = ProjectsResponse),
        (status = 400, description = "Missing userId", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_projects(gateway: Gateway, actor: QueryActor) -> AppResult<HttpResponse> {
    let QueryActor(actor) = actor;
    let projects = gateway
        .invoke(procedures::list_projects(actor.user_id))
        .await?;

    Ok(HttpResponse::Ok().json(ProjectsResponse { ok: true, projects }))
}

/// Create a project.
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Role may not author projects", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_project(
    gateway: Gateway,
    body: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    let (user_id, fields) = validate(body.into_inner())?;
    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;

    let created = gateway
        .invoke(procedures::create_project(
            actor.user_id,
            &fields.name,
            fields.description,
        ))
        .await?;
    let id = created
        .first()
        .and_then(|row| rows::int_column(row, "project_id"));

    info!(project_id = ?id, organization_id = actor.organization_id, "Project created");

    Ok(HttpResponse::Ok().json(CreatedResponse { ok: true, id }))
}

/// Edit a project's name and description.
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project id")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = OkResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 403, description = "Another organization's project", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_project(
    gateway: Gateway,
    path: web::Path<i64>,
    body: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let (user_id, fields) = validate(body.into_inner())?;
    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    actor.project(gateway.get_ref(), project_id).await?;

    gateway
        .invoke(procedures::update_project(
            actor.user_id,
            project_id,
            &fields.name,
            fields.description,
        ))
        .await?;

    info!(project_id, "Project updated");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Delete a project.
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("userId" = Option<i64>, Query, description = "Acting user, when not in the body")
    ),
    responses(
        (status = 200, description = "Project deleted", body = OkResponse),
        (status = 403, description = "Another organization's project", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_project(
    gateway: Gateway,
    path: web::Path<i64>,
    query: web::Query<ActorParams>,
    body: Option<web::Json<ActorBody>>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let user_id = delete_actor_id(&query, body.as_deref())?;
    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    actor.project(gateway.get_ref(), project_id).await?;

    gateway
        .invoke(procedures::delete_project(actor.user_id, project_id))
        .await?;

    info!(project_id, "Project deleted");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource("/projects/{id}")
            .route(web::put().to(update_project))
            .route(web::delete().to(delete_project)),
    );
}
