//! User and account models.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::Row;

/// Maximum field lengths accepted by account creation.
pub mod limits {
    pub const USERNAME: usize = 150;
    pub const EMPLOYEE_CODE: usize = 50;
    pub const DESIGNATION: usize = 100;
    pub const PASSWORD: usize = 255;
}

/// User roles. Testers execute runs; writers and admins author content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Writer,
    Tester,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Writer, Role::Tester, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Writer => "writer",
            Self::Tester => "tester",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "writer" => Some(Self::Writer),
            "tester" => Some(Self::Tester),
            _ => None,
        }
    }

    /// May create, edit and delete projects, cases, runs and statuses.
    pub fn can_author(&self) -> bool {
        matches!(self, Self::Admin | Self::Writer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity row returned by `get_user_context`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserContextRow {
    pub user_id: i64,
    pub organization_id: i64,
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    #[schema(value_type = Option<String>)]
    pub password: Option<SecretString>,
}

/// Login response: the user row as returned by the store.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub ok: bool,
    #[schema(value_type = Object)]
    pub user: Row,
}

/// Self-service account creation body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub employee_code: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    #[schema(value_type = Option<String>)]
    pub password: Option<SecretString>,
    /// Defaults to the configured organization
    pub organization_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserResponse {
    pub ok: bool,
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RolesResponse {
    pub ok: bool,
    pub roles: Vec<Role>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub ok: bool,
    #[schema(value_type = Vec<Object>)]
    pub users: Vec<Row>,
}
