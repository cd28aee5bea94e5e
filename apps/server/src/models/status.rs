//! Organization-defined execution statuses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::Row;

/// Reserved sentinel every run case starts in.
pub const UNTESTED: &str = "UNTESTED";

/// True for any spelling of the reserved sentinel.
pub fn is_reserved(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(UNTESTED)
}

/// `#rgb` or `#rrggbb`.
pub fn is_valid_color(hex: &str) -> bool {
    match hex.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Create/recolor body. The name comes from the path on edits.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub color_hex: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusesResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub statuses: Vec<Row>,
}
