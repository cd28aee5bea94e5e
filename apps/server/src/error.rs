//! Domain error types for the test management server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Every variant renders the `{ok: false, error}` envelope with a fixed status.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::db::{GatewayError, ProcedureErrorKind};

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed request field, raised before any store call
    #[error("{0}")]
    InvalidInput(String),

    /// Authentication rejected
    #[error("{0}")]
    Unauthorized(String),

    /// Acting user may not touch the target resource
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Store unreachable
    #[error("Database connection failed")]
    Connectivity(String),

    /// Store-side rejection; message passed through
    #[error("{message}")]
    Procedure {
        kind: ProcedureErrorKind,
        message: String,
    },

    /// Multi-step write aborted and rolled back
    #[error("{0}")]
    SequenceAborted(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Connectivity(_)
            | AppError::Procedure { .. }
            | AppError::SequenceAborted(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for a missing required field.
    pub fn missing(field: &str) -> Self {
        AppError::InvalidInput(format!("{} is required", field))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Connectivity(detail) => {
                tracing::error!("Database connectivity error: {}", detail);
            }
            AppError::Procedure { kind, message } => {
                tracing::error!(kind = ?kind, "Procedure error: {}", message);
            }
            AppError::SequenceAborted(message) => {
                tracing::error!("Sequence aborted: {}", message);
            }
            _ => {}
        }

        HttpResponse::build(AppError::status_code(self)).json(ErrorResponse::new(self.to_string()))
    }
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Connectivity(detail) => AppError::Connectivity(detail),
            GatewayError::Procedure {
                kind: ProcedureErrorKind::InvalidCredentials,
                message,
            } => AppError::Unauthorized(message),
            GatewayError::Procedure { kind, message } => AppError::Procedure { kind, message },
            aborted @ GatewayError::SequenceAborted { .. } => {
                AppError::SequenceAborted(aborted.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Procedure {
            kind: ProcedureErrorKind::Other,
            message: format!("Unexpected procedure result: {}", err),
        }
    }
}
