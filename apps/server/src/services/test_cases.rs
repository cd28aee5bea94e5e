//! Test case writes with their ordered steps.
//!
//! A case and its steps are written as one unit: create inserts the case then
//! each step, edit rewrites the case, deletes every step and re-inserts the new
//! list. Both run inside a single transaction.

use tracing::info;

use crate::db::{procedures, rows, ProcedureErrorKind, ProcedureGateway, Sequence};
use crate::error::{AppError, AppResult};
use crate::models::test_case::limits;
use crate::models::{check_max_len, optional_text, required_text, TestCaseRequest};

/// A validated step, positioned by its index in the submitted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDraft {
    pub description: String,
    pub required_data: Option<String>,
}

/// A validated create/edit body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseDraft {
    pub title: String,
    pub description: Option<String>,
    pub steps: Vec<StepDraft>,
}

impl TestCaseDraft {
    /// Validate a request body. Runs before any store call.
    pub fn from_request(req: TestCaseRequest) -> AppResult<Self> {
        let title = required_text(req.title, "title")?;
        let description = optional_text(req.description);
        check_max_len(Some(&title), "title", limits::TITLE)?;
        check_max_len(description.as_deref(), "description", limits::DESCRIPTION)?;

        let steps = req
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| {
                let field = format!("steps[{}].description", i);
                let description = required_text(step.description, &field)?;
                check_max_len(Some(&description), &field, limits::STEP_DESCRIPTION)?;

                let required_data = optional_text(step.required_data);
                check_max_len(
                    required_data.as_deref(),
                    &format!("steps[{}].required_data", i),
                    limits::REQUIRED_DATA,
                )?;

                Ok(StepDraft {
                    description,
                    required_data,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            title,
            description,
            steps,
        })
    }
}

async fn write_steps(
    seq: &mut Sequence,
    user_id: i64,
    test_case_id: i64,
    steps: &[StepDraft],
) -> AppResult<()> {
    for (i, step) in steps.iter().enumerate() {
        seq.step(procedures::create_test_step(
            user_id,
            test_case_id,
            i as i64 + 1,
            &step.description,
            step.required_data.clone(),
        ))
        .await?;
    }
    Ok(())
}

/// Insert a case and its steps; returns the new case id.
pub async fn create(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
    project_id: i64,
    draft: &TestCaseDraft,
) -> AppResult<i64> {
    let mut seq = Sequence::begin(gateway).await?;

    let created = seq
        .step(procedures::create_test_case(
            user_id,
            project_id,
            &draft.title,
            draft.description.clone(),
        ))
        .await?;
    let test_case_id = created
        .first()
        .and_then(|row| rows::int_column(row, "test_case_id"))
        .ok_or_else(|| AppError::Procedure {
            kind: ProcedureErrorKind::Other,
            message: "create_test_case returned no test_case_id".to_string(),
        })?;

    write_steps(&mut seq, user_id, test_case_id, &draft.steps).await?;
    seq.commit().await?;

    info!(
        test_case_id,
        project_id,
        steps = draft.steps.len(),
        "Test case created"
    );
    Ok(test_case_id)
}

/// Rewrite a case and replace its steps wholesale.
pub async fn update(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
    test_case_id: i64,
    draft: &TestCaseDraft,
) -> AppResult<()> {
    let mut seq = Sequence::begin(gateway).await?;

    seq.step(procedures::update_test_case(
        user_id,
        test_case_id,
        &draft.title,
        draft.description.clone(),
    ))
    .await?;
    seq.step(procedures::delete_test_steps(user_id, test_case_id))
        .await?;
    write_steps(&mut seq, user_id, test_case_id, &draft.steps).await?;
    seq.commit().await?;

    info!(test_case_id, steps = draft.steps.len(), "Test case updated");
    Ok(())
}
