//! Derived progress of a test run.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Count of run cases sharing one status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub name: String,
    /// Display color; `null` for UNTESTED
    pub color: Option<String>,
    pub count: u64,
}

/// Per-status breakdown of a run, in first-seen label order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: u64,
    pub by_status: Vec<StatusCount>,
}

/// Completion derived from a [`RunSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RunProgress {
    pub completed: u64,
    /// Whole percent, rounded half up
    pub percent: u64,
}
