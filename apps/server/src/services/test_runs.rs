//! Test run writes and progress reads.

use std::collections::HashSet;

use futures_util::future::try_join_all;
use tracing::{debug, info};

use crate::db::{procedures, rows, ProcedureErrorKind, ProcedureGateway, Sequence};
use crate::error::{AppError, AppResult};
use crate::models::{
    optional_text, required_text, RunCaseRow, RunProgress, RunSummary, RunSummaryEntry,
    TestRunRequest,
};
use crate::services::run_progress::aggregate;

/// A validated create/edit body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRunDraft {
    pub tester_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Distinct case ids in submission order.
    pub test_case_ids: Vec<i64>,
}

impl TestRunDraft {
    /// Validate a request body. Runs before any store call.
    pub fn from_request(req: TestRunRequest) -> AppResult<Self> {
        let name = required_text(req.name, "name")?;
        let tester_id = req.tester_id.ok_or_else(|| AppError::missing("testerId"))?;

        Ok(Self {
            tester_id,
            name,
            description: optional_text(req.description),
            test_case_ids: distinct_in_order(&req.test_case_ids),
        })
    }
}

/// Drop repeated ids, keeping the first occurrence.
pub fn distinct_in_order(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Every id must name a case of the run's project.
pub async fn ensure_cases_in_project(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
    project_id: i64,
    test_case_ids: &[i64],
) -> AppResult<()> {
    if test_case_ids.is_empty() {
        return Ok(());
    }

    let listed = gateway
        .invoke(procedures::list_test_cases(user_id, project_id))
        .await?;
    let known: HashSet<i64> = listed
        .iter()
        .filter_map(|row| rows::int_column(row, "test_case_id"))
        .collect();

    match test_case_ids.iter().find(|id| !known.contains(id)) {
        Some(id) => Err(AppError::InvalidInput(format!(
            "Test case {} does not belong to project {}",
            id, project_id
        ))),
        None => Ok(()),
    }
}

async fn add_cases(
    seq: &mut Sequence,
    user_id: i64,
    test_run_id: i64,
    test_case_ids: &[i64],
) -> AppResult<()> {
    for test_case_id in test_case_ids {
        seq.step(procedures::add_test_run_case(user_id, test_run_id, *test_case_id))
            .await?;
    }
    Ok(())
}

/// Insert a run and attach its cases, each starting UNTESTED.
pub async fn create(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
    project_id: i64,
    draft: &TestRunDraft,
) -> AppResult<i64> {
    let mut seq = Sequence::begin(gateway).await?;

    let created = seq
        .step(procedures::create_test_run(
            user_id,
            project_id,
            draft.tester_id,
            &draft.name,
            draft.description.clone(),
        ))
        .await?;
    let test_run_id = created
        .first()
        .and_then(|row| rows::int_column(row, "test_run_id"))
        .ok_or_else(|| AppError::Procedure {
            kind: ProcedureErrorKind::Other,
            message: "create_test_run returned no test_run_id".to_string(),
        })?;

    add_cases(&mut seq, user_id, test_run_id, &draft.test_case_ids).await?;
    seq.commit().await?;

    info!(
        test_run_id,
        project_id,
        cases = draft.test_case_ids.len(),
        "Test run created"
    );
    Ok(test_run_id)
}

/// Rewrite a run and replace its case list. Every case restarts UNTESTED.
pub async fn update(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
    test_run_id: i64,
    draft: &TestRunDraft,
) -> AppResult<()> {
    let mut seq = Sequence::begin(gateway).await?;

    seq.step(procedures::update_test_run(
        user_id,
        test_run_id,
        draft.tester_id,
        &draft.name,
        draft.description.clone(),
    ))
    .await?;
    seq.step(procedures::delete_test_run_cases(user_id, test_run_id))
        .await?;
    add_cases(&mut seq, user_id, test_run_id, &draft.test_case_ids).await?;
    seq.commit().await?;

    info!(
        test_run_id,
        cases = draft.test_case_ids.len(),
        "Test run updated"
    );
    Ok(())
}

/// Aggregate the current case rows of one run.
pub async fn fetch_summary(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
    test_run_id: i64,
) -> AppResult<(RunSummary, RunProgress)> {
    let found = gateway
        .invoke(procedures::list_test_run_cases(user_id, test_run_id))
        .await?;
    let cases: Vec<RunCaseRow> = rows::decode_all(found)?;
    let summary = aggregate(&cases);
    let progress = summary.progress();
    Ok((summary, progress))
}

/// Summaries of every run in a project, fetched concurrently.
///
/// Any single failure fails the whole batch. Results keep the order of
/// `list_test_runs`.
pub async fn project_summaries(
    gateway: &dyn ProcedureGateway,
    user_id: i64,
    project_id: i64,
) -> AppResult<Vec<RunSummaryEntry>> {
    let runs = gateway
        .invoke(procedures::list_test_runs(user_id, project_id))
        .await?;
    let run_ids: Vec<i64> = runs
        .iter()
        .filter_map(|row| rows::int_column(row, "test_run_id"))
        .collect();

    debug!(project_id, runs = run_ids.len(), "Fetching run summaries");

    try_join_all(run_ids.into_iter().map(|test_run_id| async move {
        let (summary, progress) = fetch_summary(gateway, user_id, test_run_id).await?;
        Ok::<_, AppError>(RunSummaryEntry {
            test_run_id,
            summary,
            progress,
        })
    }))
    .await
}
