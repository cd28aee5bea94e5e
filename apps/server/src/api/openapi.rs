//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Testbench Server",
        version = "0.1.0",
        description = "API server for managing test cases, test runs and execution results over stored procedures"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::db_health,
        // Account endpoints
        api::accounts::login,
        api::accounts::roles,
        api::accounts::create_account,
        api::accounts::org_users,
        // Project endpoints
        api::projects::list_projects,
        api::projects::create_project,
        api::projects::update_project,
        api::projects::delete_project,
        // Test case endpoints
        api::test_cases::list_test_cases,
        api::test_cases::create_test_case,
        api::test_cases::update_test_case,
        api::test_cases::delete_test_case,
        api::test_cases::list_steps,
        // Test run endpoints
        api::test_runs::list_test_runs,
        api::test_runs::create_test_run,
        api::test_runs::project_run_summaries,
        api::test_runs::update_test_run,
        api::test_runs::delete_test_run,
        api::test_runs::list_run_cases,
        api::test_runs::update_run_case,
        api::test_runs::run_summary,
        // Status endpoints
        api::statuses::list_statuses,
        api::statuses::create_status,
        api::statuses::update_status,
        api::statuses::delete_status,
        // Analytics endpoints
        api::analytics::organization_analytics,
        api::analytics::project_analytics,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::OkResponse,
            models::CreatedResponse,
            models::ActorBody,
            // Health
            api::health::HealthResponse,
            api::health::DbHealthResponse,
            // Accounts
            models::Role,
            models::LoginRequest,
            models::LoginResponse,
            models::CreateUserRequest,
            models::CreatedUserResponse,
            models::RolesResponse,
            models::UsersResponse,
            // Projects
            models::ProjectRequest,
            models::ProjectsResponse,
            // Test cases
            models::TestStepInput,
            models::TestCaseRequest,
            models::TestCasesResponse,
            models::StepsResponse,
            // Test runs
            models::TestRunRequest,
            models::TestRunsResponse,
            models::RunCasesResponse,
            models::RunCaseUpdateRequest,
            models::StatusCount,
            models::RunSummary,
            models::RunProgress,
            models::RunSummaryResponse,
            models::RunSummaryEntry,
            models::RunSummariesResponse,
            // Statuses
            models::StatusRequest,
            models::StatusesResponse,
            // Analytics
            models::AnalyticsScope,
            models::AnalyticsTotals,
            models::RoleShare,
            models::StatusShare,
            models::AnalyticsSummary,
            models::AnalyticsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Accounts", description = "Login, account creation and organization users"),
        (name = "Projects", description = "Project management"),
        (name = "Test Cases", description = "Test cases and their ordered steps"),
        (name = "Test Runs", description = "Test runs, execution results and progress"),
        (name = "Statuses", description = "Configurable execution statuses"),
        (name = "Analytics", description = "Organization and project analytics")
    )
)]
pub struct ApiDoc;
