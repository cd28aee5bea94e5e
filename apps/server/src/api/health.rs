//! Health check endpoints.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Gateway;
use crate::error::AppResult;

/// Health check response.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: String,
    pub timestamp: String,
}

/// Store probe response.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DbHealthResponse {
    pub ok: bool,
    pub database: String,
}

/// Health check endpoint.
///
/// Returns 200 if the service is running.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Store probe.
///
/// Runs `SELECT 1` against the relational store.
#[utoipa::path(
    get,
    path = "/api/db/health",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = DbHealthResponse),
        (status = 500, description = "Store unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn db_health(gateway: Gateway) -> AppResult<HttpResponse> {
    gateway.ping().await?;
    Ok(HttpResponse::Ok().json(DbHealthResponse {
        ok: true,
        database: "connected".to_string(),
    }))
}

/// Configure health routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(
            web::resource("/db/health")
                .route(web::get().to(db_health))
                .route(web::post().to(db_health)),
        );
}
