//! Domain models and request/response DTOs for the test management API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub mod analytics;
pub mod project;
pub mod run_summary;
pub mod status;
pub mod test_case;
pub mod test_run;
pub mod user;

// Re-export commonly used types
pub use analytics::{
    AnalyticsResponse, AnalyticsScope, AnalyticsSummary, AnalyticsTotals, OrgCountsRow, ProjectCountsRow,
    RoleCountRow, RoleShare, StatusCountRow, StatusShare,
};
pub use project::{ProjectRequest, ProjectScopeRow, ProjectsResponse};
pub use run_summary::{RunProgress, RunSummary, StatusCount};
pub use status::{StatusRequest, StatusesResponse, UNTESTED};
pub use test_case::{
    StepsResponse, TestCaseRequest, TestCaseScopeRow, TestCasesResponse, TestStepInput,
};
pub use test_run::{
    RunCaseRow, RunCaseUpdateRequest, RunCasesResponse, RunSummariesResponse, RunSummaryEntry,
    RunSummaryResponse, TestRunRequest, TestRunScopeRow, TestRunsResponse,
};
pub use user::{
    CreateUserRequest, CreatedUserResponse, LoginRequest, LoginResponse, Role, RolesResponse,
    UserContextRow, UsersResponse,
};

/// Acting user passed in the query string of read endpoints.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorParams {
    pub user_id: Option<i64>,
}

/// Acting user passed in the body of delete endpoints.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorBody {
    pub user_id: Option<i64>,
}

/// Success envelope with no payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Success envelope carrying the id of a created resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub ok: bool,
    pub id: Option<i64>,
}

/// Require the acting user id.
pub fn require_user_id(user_id: Option<i64>) -> AppResult<i64> {
    user_id.ok_or_else(|| AppError::missing("userId"))
}

/// Require a non-blank text field, returning it trimmed.
pub fn required_text(value: Option<String>, field: &str) -> AppResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::missing(field)),
    }
}

/// Trim an optional text field; blank becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reject values longer than `max` characters.
pub fn check_max_len(value: Option<&str>, field: &str, max: usize) -> AppResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}
