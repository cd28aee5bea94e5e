//! Stored procedure catalog.
//!
//! Names and parameter order are a fixed contract with the database; every
//! call the server makes is built here.

use chrono::NaiveDate;

use super::{Param, ProcedureCall};

// Accounts

pub fn login_user(username: &str, password: &str) -> ProcedureCall {
    ProcedureCall::new("login_user", vec![username.into(), password.into()])
}

#[allow(clippy::too_many_arguments)]
pub fn create_user(
    org_id: i64,
    username: &str,
    employee_code: &str,
    designation: Option<String>,
    join_date: NaiveDate,
    role: &str,
    password: &str,
) -> ProcedureCall {
    ProcedureCall::new(
        "create_user",
        vec![
            org_id.into(),
            username.into(),
            employee_code.into(),
            designation.into(),
            join_date.into(),
            role.into(),
            password.into(),
        ],
    )
}

pub fn get_user_context(user_id: i64) -> ProcedureCall {
    ProcedureCall::new("get_user_context", vec![user_id.into()])
}

pub fn list_org_users(user_id: i64) -> ProcedureCall {
    ProcedureCall::new("list_org_users", vec![user_id.into()])
}

// Projects

pub fn list_projects(user_id: i64) -> ProcedureCall {
    ProcedureCall::new("list_projects", vec![user_id.into()])
}

pub fn get_project(user_id: i64, project_id: i64) -> ProcedureCall {
    ProcedureCall::new("get_project", vec![user_id.into(), project_id.into()])
}

pub fn create_project(user_id: i64, name: &str, description: Option<String>) -> ProcedureCall {
    ProcedureCall::new(
        "create_project",
        vec![user_id.into(), name.into(), description.into()],
    )
}

pub fn update_project(
    user_id: i64,
    project_id: i64,
    name: &str,
    description: Option<String>,
) -> ProcedureCall {
    ProcedureCall::new(
        "update_project",
        vec![
            user_id.into(),
            project_id.into(),
            name.into(),
            description.into(),
        ],
    )
}

pub fn delete_project(user_id: i64, project_id: i64) -> ProcedureCall {
    ProcedureCall::new("delete_project", vec![user_id.into(), project_id.into()])
}

// Test cases and steps

pub fn list_test_cases(user_id: i64, project_id: i64) -> ProcedureCall {
    ProcedureCall::new("list_test_cases", vec![user_id.into(), project_id.into()])
}

pub fn get_test_case(user_id: i64, test_case_id: i64) -> ProcedureCall {
    ProcedureCall::new("get_test_case", vec![user_id.into(), test_case_id.into()])
}

pub fn create_test_case(
    user_id: i64,
    project_id: i64,
    title: &str,
    description: Option<String>,
) -> ProcedureCall {
    ProcedureCall::new(
        "create_test_case",
        vec![
            user_id.into(),
            project_id.into(),
            title.into(),
            description.into(),
        ],
    )
}

pub fn update_test_case(
    user_id: i64,
    test_case_id: i64,
    title: &str,
    description: Option<String>,
) -> ProcedureCall {
    ProcedureCall::new(
        "update_test_case",
        vec![
            user_id.into(),
            test_case_id.into(),
            title.into(),
            description.into(),
        ],
    )
}

pub fn delete_test_case(user_id: i64, test_case_id: i64) -> ProcedureCall {
    ProcedureCall::new("delete_test_case", vec![user_id.into(), test_case_id.into()])
}

pub fn list_test_steps(user_id: i64, test_case_id: i64) -> ProcedureCall {
    ProcedureCall::new("list_test_steps", vec![user_id.into(), test_case_id.into()])
}

pub fn delete_test_steps(user_id: i64, test_case_id: i64) -> ProcedureCall {
    ProcedureCall::new("delete_test_steps", vec![user_id.into(), test_case_id.into()])
}

pub fn create_test_step(
    user_id: i64,
    test_case_id: i64,
    step_order: i64,
    description: &str,
    required_data: Option<String>,
) -> ProcedureCall {
    ProcedureCall::new(
        "create_test_step",
        vec![
            user_id.into(),
            test_case_id.into(),
            step_order.into(),
            description.into(),
            required_data.into(),
        ],
    )
}

// Test runs

pub fn list_test_runs(user_id: i64, project_id: i64) -> ProcedureCall {
    ProcedureCall::new("list_test_runs", vec![user_id.into(), project_id.into()])
}

pub fn get_test_run(user_id: i64, test_run_id: i64) -> ProcedureCall {
    ProcedureCall::new("get_test_run", vec![user_id.into(), test_run_id.into()])
}

pub fn create_test_run(
    user_id: i64,
    project_id: i64,
    tester_id: i64,
    name: &str,
    description: Option<String>,
) -> ProcedureCall {
    ProcedureCall::new(
        "create_test_run",
        vec![
            user_id.into(),
            project_id.into(),
            tester_id.into(),
            name.into(),
            description.into(),
        ],
    )
}

pub fn update_test_run(
    user_id: i64,
    test_run_id: i64,
    tester_id: i64,
    name: &str,
    description: Option<String>,
) -> ProcedureCall {
    ProcedureCall::new(
        "update_test_run",
        vec![
            user_id.into(),
            test_run_id.into(),
            tester_id.into(),
            name.into(),
            description.into(),
        ],
    )
}

pub fn delete_test_run(user_id: i64, test_run_id: i64) -> ProcedureCall {
    ProcedureCall::new("delete_test_run", vec![user_id.into(), test_run_id.into()])
}

pub fn delete_test_run_cases(user_id: i64, test_run_id: i64) -> ProcedureCall {
    ProcedureCall::new(
        "delete_test_run_cases",
        vec![user_id.into(), test_run_id.into()],
    )
}

pub fn add_test_run_case(user_id: i64, test_run_id: i64, test_case_id: i64) -> ProcedureCall {
    ProcedureCall::new(
        "add_test_run_case",
        vec![user_id.into(), test_run_id.into(), test_case_id.into()],
    )
}

pub fn list_test_run_cases(user_id: i64, test_run_id: i64) -> ProcedureCall {
    ProcedureCall::new(
        "list_test_run_cases",
        vec![user_id.into(), test_run_id.into()],
    )
}

pub fn update_test_run_case(
    user_id: i64,
    test_run_id: i64,
    test_case_id: i64,
    status_name: &str,
    notes: Option<String>,
) -> ProcedureCall {
    ProcedureCall::new(
        "update_test_run_case",
        vec![
            user_id.into(),
            test_run_id.into(),
            test_case_id.into(),
            status_name.into(),
            notes.into(),
        ],
    )
}

// Statuses

pub fn list_statuses(user_id: i64) -> ProcedureCall {
    ProcedureCall::new("list_statuses", vec![user_id.into()])
}

pub fn create_status(user_id: i64, name: &str, color_hex: &str) -> ProcedureCall {
    ProcedureCall::new(
        "create_status",
        vec![user_id.into(), name.into(), color_hex.into()],
    )
}

pub fn update_status(user_id: i64, name: &str, color_hex: &str) -> ProcedureCall {
    ProcedureCall::new(
        "update_status",
        vec![user_id.into(), name.into(), color_hex.into()],
    )
}

pub fn delete_status(user_id: i64, name: &str) -> ProcedureCall {
    ProcedureCall::new("delete_status", vec![user_id.into(), name.into()])
}

// Analytics

pub fn org_analytics_counts(user_id: i64) -> ProcedureCall {
    ProcedureCall::new("org_analytics_counts", vec![user_id.into()])
}

pub fn org_users_by_role(user_id: i64) -> ProcedureCall {
    ProcedureCall::new("org_users_by_role", vec![user_id.into()])
}

pub fn org_status_distribution(user_id: i64) -> ProcedureCall {
    ProcedureCall::new("org_status_distribution", vec![user_id.into()])
}

pub fn project_analytics_counts(user_id: i64, project_id: i64) -> ProcedureCall {
    ProcedureCall::new(
        "project_analytics_counts",
        vec![user_id.into(), project_id.into()],
    )
}

pub fn project_status_distribution(user_id: i64, project_id: i64) -> ProcedureCall {
    ProcedureCall::new(
        "project_status_distribution",
        vec![user_id.into(), project_id.into()],
    )
}
