//! Test run and run-case models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::run_summary::{RunProgress, RunSummary};
use crate::db::Row;

/// Create/edit body. The case list replaces the run's cases wholesale.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestRunRequest {
    pub user_id: Option<i64>,
    pub tester_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub test_case_ids: Vec<i64>,
}

/// Ownership columns of `get_test_run`.
#[derive(Debug, Clone, Deserialize)]
pub struct TestRunScopeRow {
    pub test_run_id: i64,
    pub project_id: i64,
    pub organization_id: i64,
}

/// Status columns of `list_test_run_cases`, as consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunCaseRow {
    pub test_case_id: i64,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
}

/// Execution result for one case in a run.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunCaseUpdateRequest {
    pub user_id: Option<i64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestRunsResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub test_runs: Vec<Row>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunCasesResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub run_cases: Vec<Row>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RunSummaryResponse {
    pub ok: bool,
    pub summary: RunSummary,
    pub progress: RunProgress,
}

/// Summary card for one run of a project.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunSummaryEntry {
    pub test_run_id: i64,
    pub summary: RunSummary,
    pub progress: RunProgress,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RunSummariesResponse {
    pub ok: bool,
    pub summaries: Vec<RunSummaryEntry>,
}
