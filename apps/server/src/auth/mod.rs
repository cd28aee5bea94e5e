//! Acting-user resolution and organization scoping.
//!
//! Every resource endpoint resolves the caller's organization and compares it
//! with the organization of the resource it touches before mutating anything.

mod extractor;

use tracing::warn;

use crate::db::{procedures, rows, GatewayError, ProcedureErrorKind, ProcedureGateway};
use crate::error::{AppError, AppResult};
use crate::models::{ProjectScopeRow, Role, TestCaseScopeRow, TestRunScopeRow, UserContextRow};

pub use extractor::{delete_actor_id, QueryActor};

/// The user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser {
    pub user_id: i64,
    pub organization_id: i64,
    pub role: Option<Role>,
}

async fn lookup_user(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
) -> AppResult<Option<UserContextRow>> {
    match gateway.invoke(procedures::get_user_context(user_id)).await {
        Ok(found) => Ok(rows::decode_first(found)?),
        Err(GatewayError::Procedure {
            kind: ProcedureErrorKind::UserNotFound,
            ..
        }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl ActingUser {
    /// Load the caller's organization and role.
    pub async fn resolve(gateway: &dyn ProcedureGateway, user_id: i64) -> AppResult<Self> {
        let row = lookup_user(gateway, user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(Self {
            user_id: row.user_id,
            organization_id: row.organization_id,
            role: row.role.as_deref().and_then(Role::parse),
        })
    }

    /// Resolve the caller and require an authoring role.
    pub async fn resolve_author(gateway: &dyn ProcedureGateway, user_id: i64) -> AppResult<Self> {
        let actor = Self::resolve(gateway, user_id).await?;
        actor.require_author()?;
        Ok(actor)
    }

    /// Only writers and admins may change projects, cases, runs and statuses.
    pub fn require_author(&self) -> AppResult<()> {
        match self.role {
            Some(role) if role.can_author() => Ok(()),
            _ => Err(AppError::Forbidden(
                "Writer or admin role required".to_string(),
            )),
        }
    }

    fn ensure_same_org(&self, organization_id: i64, what: &str) -> AppResult<()> {
        if organization_id == self.organization_id {
            Ok(())
        } else {
            warn!(
                user_id = self.user_id,
                user_org = self.organization_id,
                resource_org = organization_id,
                "Cross-organization access to {} denied",
                what
            );
            Err(AppError::Forbidden(format!(
                "{} belongs to another organization",
                what
            )))
        }
    }

    /// Project owned by the caller's organization.
    pub async fn project(
        &self,
        gateway: &dyn ProcedureGateway,
        project_id: i64,
    ) -> AppResult<ProjectScopeRow> {
        let found = gateway
            .invoke(procedures::get_project(self.user_id, project_id))
            .await?;
        let scope: ProjectScopeRow = rows::decode_first(found)?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;
        self.ensure_same_org(scope.organization_id, "Project")?;
        Ok(scope)
    }

    /// Test case owned by the caller's organization.
    pub async fn test_case(
        &self,
        gateway: &dyn ProcedureGateway,
        test_case_id: i64,
    ) -> AppResult<TestCaseScopeRow> {
        let found = gateway
            .invoke(procedures::get_test_case(self.user_id, test_case_id))
            .await?;
        let scope: TestCaseScopeRow = rows::decode_first(found)?
            .ok_or_else(|| AppError::NotFound(format!("Test case {}", test_case_id)))?;
        self.ensure_same_org(scope.organization_id, "Test case")?;
        Ok(scope)
    }

    /// Test run owned by the caller's organization.
    pub async fn test_run(
        &self,
        gateway: &dyn ProcedureGateway,
        test_run_id: i64,
    ) -> AppResult<TestRunScopeRow> {
        let found = gateway
            .invoke(procedures::get_test_run(self.user_id, test_run_id))
            .await?;
        let scope: TestRunScopeRow = rows::decode_first(found)?
            .ok_or_else(|| AppError::NotFound(format!("Test run {}", test_run_id)))?;
        self.ensure_same_org(scope.organization_id, "Test run")?;
        Ok(scope)
    }

    /// Another user (e.g. an assigned tester) in the caller's organization.
    pub async fn colleague(&self, gateway: &dyn ProcedureGateway, user_id: i64) -> AppResult<()> {
        let row = lookup_user(gateway, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
        self.ensure_same_org(row.organization_id, "User")
    }
}
