//! Configurable execution statuses.
//!
//! `UNTESTED` is the store's sentinel: it is never listed here and cannot be
//! created, recolored or deleted through these endpoints.

use actix_web::{web, HttpResponse};
use tracing::info;

use super::Gateway;
use crate::auth::{delete_actor_id, ActingUser, QueryActor};
use crate::db::{procedures, Row};
use crate::error::{AppError, AppResult};
use crate::models::status::{is_reserved, is_valid_color};
use crate::models::{
    require_user_id, required_text, ActorBody, ActorParams, OkResponse, StatusRequest,
    StatusesResponse, UNTESTED,
};

fn reject_reserved(name: &str) -> AppResult<()> {
    if is_reserved(name) {
        Err(AppError::InvalidInput(format!(
            "{} is a reserved status",
            UNTESTED
        )))
    } else {
        Ok(())
    }
}

fn required_color(value: Option<String>) -> AppResult<String> {
    let color = required_text(value, "colorHex")?;
    if is_valid_color(&color) {
        Ok(color)
    } else {
        Err(AppError::InvalidInput(format!(
            "colorHex must look like #rrggbb, got {}",
            color
        )))
    }
}

fn is_sentinel_row(row: &Row) -> bool {
    row.get("status_name")
        .and_then(|v| v.as_str())
        .is_some_and(is_reserved)
}

/// List the organization's statuses.
#[utoipa::path(
    get,
    path = "/api/statuses",
    tag = "Statuses",
    params(("userId" = i64, Query, description = "Acting user")),
    responses(
        (status = 200, description = "Statuses, UNTESTED excluded", body = StatusesResponse),
    )
)]
pub async fn list_statuses(gateway: Gateway, actor: QueryActor) -> AppResult<HttpResponse> {
    let QueryActor(actor) = actor;
    let statuses = gateway
        .invoke(procedures::list_statuses(actor.user_id))
        .await?
        .into_iter()
        .filter(|row| !is_sentinel_row(row))
        .collect();

    Ok(HttpResponse::Ok().json(StatusesResponse { ok: true, statuses }))
}

/// Create a status.
#[utoipa::path(
    post,
    path = "/api/statuses",
    tag = "Statuses",
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status created", body = OkResponse),
        (status = 400, description = "Invalid or reserved name", body = crate::error::ErrorResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_status(
    gateway: Gateway,
    body: web::Json<StatusRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user_id = require_user_id(body.user_id)?;
    let name = required_text(body.name, "name")?;
    reject_reserved(&name)?;
    let color = required_color(body.color_hex)?;

    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    gateway
        .invoke(procedures::create_status(actor.user_id, &name, &color))
        .await?;

    info!(status = %name, organization_id = actor.organization_id, "Status created");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Recolor a status.
#[utoipa::path(
    put,
    path = "/api/statuses/{name}",
    tag = "Statuses",
    params(("name" = String, Path, description = "Status name")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OkResponse),
        (status = 400, description = "Invalid or reserved name", body = crate::error::ErrorResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_status(
    gateway: Gateway,
    path: web::Path<String>,
    body: web::Json<StatusRequest>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    reject_reserved(&name)?;
    let body = body.into_inner();
    let user_id = require_user_id(body.user_id)?;
    let color = required_color(body.color_hex)?;

    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    gateway
        .invoke(procedures::update_status(actor.user_id, &name, &color))
        .await?;

    info!(status = %name, "Status updated");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Delete a status.
#[utoipa::path(
    delete,
    path = "/api/statuses/{name}",
    tag = "Statuses",
    params(
        ("name" = String, Path, description = "Status name"),
        ("userId" = Option<i64>, Query, description = "Acting user, when not in the body")
    ),
    responses(
        (status = 200, description = "Status deleted", body = OkResponse),
        (status = 400, description = "Reserved name", body = crate::error::ErrorResponse),
        (status = 403, description = "Not allowed", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_status(
    gateway: Gateway,
    path: web::Path<String>,
    query: web::Query<ActorParams>,
    body: Option<web::Json<ActorBody>>,
) -> AppResult<HttpResponse> {
    let name = path.into_inner();
    reject_reserved(&name)?;
    let user_id = delete_actor_id(&query, body.as_deref())?;

    let actor = ActingUser::resolve_author(gateway.get_ref(), user_id).await?;
    gateway
        .invoke(procedures::delete_status(actor.user_id, &name))
        .await?;

    info!(status = %name, "Status deleted");

    Ok(HttpResponse::Ok().json(OkResponse::new()))
}

/// Configure status routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/statuses")
            .route(web::get().to(list_statuses))
            .route(web::post().to(create_status)),
    )
    .service(
        web::resource("/statuses/{name}")
            .route(web::put().to(update_status))
            .route(web::delete().to(delete_status)),
    );
}
