//! Test case and test step models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::Row;

/// Maximum field lengths accepted for test cases and their steps.
pub mod limits {
    pub const TITLE: usize = 200;
    pub const DESCRIPTION: usize = 1000;
    pub const STEP_DESCRIPTION: usize = 1000;
    pub const REQUIRED_DATA: usize = 500;
}

/// One step of a test case, in the order submitted.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TestStepInput {
    pub description: Option<String>,
    #[serde(default, alias = "requiredData")]
    pub required_data: Option<String>,
}

/// Create/edit body. Steps replace the existing list wholesale.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRequest {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<TestStepInput>,
}

/// Ownership columns of `get_test_case`.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCaseScopeRow {
    pub test_case_id: i64,
    pub project_id: i64,
    pub organization_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCasesResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub test_cases: Vec<Row>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StepsResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub steps: Vec<Row>,
}
