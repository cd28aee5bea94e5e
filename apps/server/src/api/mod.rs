//! API endpoint modules.

use actix_web::{web, HttpRequest};

use crate::db::ProcedureGateway;
use crate::error::AppError;

pub mod accounts;
pub mod analytics;
pub mod health;
pub mod openapi;
pub mod projects;
pub mod statuses;
pub mod test_cases;
pub mod test_runs;

pub use accounts::AccountDefaults;
pub use openapi::ApiDoc;

/// Shared procedure gateway handle.
pub type Gateway = web::Data<dyn ProcedureGateway>;

fn invalid_input(what: &str, err: impl std::fmt::Display, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), "Rejected {}: {}", what, err);
    AppError::InvalidInput(format!("Invalid {}: {}", what, err)).into()
}

/// Extractor configs so malformed bodies, queries and paths keep the error envelope.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, req| invalid_input("JSON body", err, req)),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, req| invalid_input("query string", err, req)),
    )
    .app_data(
        web::PathConfig::default().error_handler(|err, req| invalid_input("path parameter", err, req)),
    );
}

/// Every `/api` route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_extractors)
        .configure(health::configure_routes)
        .configure(accounts::configure_routes)
        .configure(projects::configure_routes)
        .configure(test_cases::configure_routes)
        .configure(test_runs::configure_routes)
        .configure(statuses::configure_routes)
        .configure(analytics::configure_routes);
}
