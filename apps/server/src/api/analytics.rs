//! Analytics API handlers.

use actix_web::{web, HttpResponse};

use super::Gateway;
use crate::auth::QueryActor;
use crate::db::{procedures, rows};
use crate::error::AppResult;
use crate::models::{
    AnalyticsResponse, OrgCountsRow, ProjectCountsRow, RoleCountRow, StatusCountRow,
};
use crate::services::analytics::{summarize_organization, summarize_project};

/// Organization-wide analytics.
#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "Analytics",
    params(("userId" = i64, Query, description = "Acting user")),
    responses(
        (status = 200, description = "Organization analytics", body = AnalyticsResponse),
        (status = 400, description = "Missing userId", body = crate::error::ErrorResponse),
    )
)]
pub async fn organization_analytics(
    gateway: Gateway,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let QueryActor(actor) = actor;

    let counts: OrgCountsRow = rows::decode_first(
        gateway
            .invoke(procedures::org_analytics_counts(actor.user_id))
            .await?,
    )?
    .unwrap_or_default();
    let roles: Vec<RoleCountRow> = rows::decode_all(
        gateway
            .invoke(procedures::org_users_by_role(actor.user_id))
            .await?,
    )?;
    let statuses: Vec<StatusCountRow> = rows::decode_all(
        gateway
            .invoke(procedures::org_status_distribution(actor.user_id))
            .await?,
    )?;

    Ok(HttpResponse::Ok().json(AnalyticsResponse {
        ok: true,
        analytics: summarize_organization(counts, roles, statuses),
    }))
}

/// Analytics for one project.
#[utoipa::path(
    get,
    path = "/api/projects/{id}/analytics",
    tag = "Analytics",
    params(
        ("id" = i64, Path, description = "Project id"),
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Project analytics", body = AnalyticsResponse),
        (status = 403, description = "Another organization's project", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn project_analytics(
    gateway: Gateway,
    path: web::Path<i64>,
    actor: QueryActor,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let QueryActor(actor) = actor;
    actor.project(gateway.get_ref(), project_id).await?;

    let counts: ProjectCountsRow = rows::decode_first(
        gateway
            .invoke(procedures::project_analytics_counts(actor.user_id, project_id))
            .await?,
    )?
    .unwrap_or_default();
    let statuses: Vec<StatusCountRow> = rows::decode_all(
        gateway
            .invoke(procedures::project_status_distribution(actor.user_id, project_id))
            .await?,
    )?;

    Ok(HttpResponse::Ok().json(AnalyticsResponse {
        ok: true,
        analytics: summarize_project(project_id, counts, statuses),
    }))
}

/// Configure analytics routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/analytics").route(web::get().to(organization_analytics)))
        .service(
            web::resource("/projects/{id}/analytics").route(web::get().to(project_analytics)),
        );
}
