//! Project models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::Row;

pub const MAX_NAME: usize = 150;
pub const MAX_DESCRIPTION: usize = 1000;

/// Create/edit body. Edits replace every field.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Ownership columns of `get_project`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectScopeRow {
    pub project_id: i64,
    pub organization_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectsResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub projects: Vec<Row>,
}
