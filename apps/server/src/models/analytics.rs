//! Analytics rows and summaries at organization and project scope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::rows::lenient_i64;

/// Row of `org_analytics_counts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgCountsRow {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub project_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub test_case_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub test_run_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub user_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub run_case_count: i64,
}

/// Row of `project_analytics_counts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectCountsRow {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub test_case_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub test_run_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub run_case_count: i64,
}

/// Row of `org_users_by_role`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleCountRow {
    pub role: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub user_count: i64,
}

/// Row of the status distribution procedures.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCountRow {
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub case_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsScope {
    Organization,
    Project,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTotals {
    /// Organization scope only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<u64>,
    pub test_cases: u64,
    pub test_runs: u64,
    /// Organization scope only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<u64>,
    pub run_cases: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoleShare {
    pub role: String,
    pub count: u64,
    /// One decimal place, e.g. `"42.3%"`
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusShare {
    pub name: String,
    pub color: Option<String>,
    pub count: u64,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub scope: AnalyticsScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    pub totals: AnalyticsTotals,
    /// Present for organization scope only, even when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_by_role: Option<Vec<RoleShare>>,
    pub average_cases_per_run: f64,
    pub status_distribution: Vec<StatusShare>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub ok: bool,
    pub analytics: AnalyticsSummary,
}
