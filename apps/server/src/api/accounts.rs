//! Login, account creation and organization user listing.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use super::Gateway;
use crate::auth::QueryActor;
use crate::db::{procedures, rows, Row};
use crate::error::{AppError, AppResult};
use crate::models::user::limits;
use crate::models::{
    check_max_len, optional_text, required_text, CreateUserRequest, CreatedUserResponse,
    LoginRequest, LoginResponse, Role, RolesResponse, UsersResponse,
};

/// Organization assigned to self-service accounts that do not name one.
#[derive(Debug, Clone, Copy)]
pub struct AccountDefaults {
    pub organization_id: i64,
}

fn required_secret(value: Option<SecretString>, field: &str) -> AppResult<SecretString> {
    value
        .filter(|v| !v.expose_secret().is_empty())
        .ok_or_else(|| AppError::missing(field))
}

/// Drop credential columns before a user row leaves the server.
fn without_secrets(mut row: Row) -> Row {
    row.retain(|column, _| !column.contains("password"));
    row
}

/// Log in with username and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing field", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
    )
)]
pub async fn login(gateway: Gateway, body: web::Json<LoginRequest>) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let username = required_text(body.username, "username")?;
    let password = required_secret(body.password, "password")?;

    let user = gateway
        .invoke(procedures::login_user(&username, password.expose_secret()))
        .await?
        .into_iter()
        .next()
        .map(without_secrets)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    info!(username = %username, "User logged in");

    Ok(HttpResponse::Ok().json(LoginResponse { ok: true, user }))
}

/// Roles a new account may take.
#[utoipa::path(
    get,
    path = "/api/auth/roles",
    tag = "Accounts",
    responses(
        (status = 200, description = "Available roles", body = RolesResponse)
    )
)]
pub async fn roles() -> HttpResponse {
    HttpResponse::Ok().json(RolesResponse {
        ok: true,
        roles: Role::ALL.to_vec(),
    })
}

/// Create an account.
///
/// The join date is today's UTC date. The organization defaults to the
/// configured one.
#[utoipa::path(
    post,
    path = "/api/auth/create",
    tag = "Accounts",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Account created", body = CreatedUserResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 500, description = "Store rejected the account", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_account(
    gateway: Gateway,
    defaults: web::Data<AccountDefaults>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let username = required_text(body.username, "username")?;
    let employee_code = required_text(body.employee_code, "employeeCode")?;
    let designation = optional_text(body.designation);
    let role_text = required_text(body.role, "role")?;
    let password = required_secret(body.password, "password")?;

    check_max_len(Some(&username), "username", limits::USERNAME)?;
    check_max_len(Some(&employee_code), "employeeCode", limits::EMPLOYEE_CODE)?;
    check_max_len(designation.as_deref(), "designation", limits::DESIGNATION)?;
    check_max_len(
        Some(password.expose_secret()),
        "password",
        limits::PASSWORD,
    )?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "role must be one of: {}",
            Role::ALL.map(|r| r.as_str()).join(", ")
        ))
    })?;

    let organization_id = body.organization_id.unwrap_or(defaults.organization_id);
    let join_date = Utc::now().date_naive();

    let created = gateway
        .invoke(procedures::create_user(
            organization_id,
            &username,
            &employee_code,
            designation,
            join_date,
            role.as_str(),
            password.expose_secret(),
        ))
        .await?;
    let user_id = created
        .first()
        .and_then(|row| rows::int_column(row, "user_id"));

    info!(
        username = %username,
        organization_id,
        role = %role,
        "Account created"
    );

    Ok(HttpResponse::Ok().json(CreatedUserResponse { ok: true, user_id }))
}

/// Users of the caller's organization.
#[utoipa::path(
    get,
    path = "/api/org/users",
    tag = "Accounts",
    params(
        ("userId" = i64, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Organization users", body = UsersResponse),
        (status = 400, description = "Missing userId", body = crate::error::ErrorResponse),
        (status = 401, description = "Unknown user", body = crate::error::ErrorResponse),
    )
)]
pub async fn org_users(gateway: Gateway, actor: QueryActor) -> AppResult<HttpResponse> {
    let QueryActor(actor) = actor;
    let users = gateway
        .invoke(procedures::list_org_users(actor.user_id))
        .await?
        .into_iter()
        .map(without_secrets)
        .collect();

    Ok(HttpResponse::Ok().json(UsersResponse { ok: true, users }))
}

/// Configure account routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/auth/login").route(web::post().to(login)))
        .service(web::resource("/auth/roles").route(web::get().to(roles)))
        .service(web::resource("/auth/create").route(web::post().to(create_account)))
        .service(web::resource("/org/users").route(web::get().to(org_users)));
}
