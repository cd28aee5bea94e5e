//! Analytics summarization over store-side counts.

use crate::models::{
    AnalyticsScope, AnalyticsSummary, AnalyticsTotals, OrgCountsRow, ProjectCountsRow,
    RoleCountRow, RoleShare, StatusCountRow, StatusShare, UNTESTED,
};

fn non_negative(v: i64) -> u64 {
    v.max(0) as u64
}

/// Share of `count` in `total` with one decimal, e.g. `"42.3%"`.
pub fn percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    let value = count as f64 * 100.0 / total as f64;
    format!("{:.1}%", round_one_decimal(value))
}

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn average_cases_per_run(run_cases: u64, runs: u64) -> f64 {
    if runs == 0 {
        0.0
    } else {
        round_one_decimal(run_cases as f64 / runs as f64)
    }
}

fn role_shares(rows: Vec<RoleCountRow>) -> Vec<RoleShare> {
    let total: u64 = rows.iter().map(|r| non_negative(r.user_count)).sum();
    rows.into_iter()
        .map(|r| {
            let count = non_negative(r.user_count);
            RoleShare {
                role: r.role,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

fn status_shares(rows: Vec<StatusCountRow>) -> Vec<StatusShare> {
    let mut merged: Vec<(String, Option<String>, u64)> = Vec::new();
    for row in rows {
        let (name, color) = match row.status_name {
            Some(name) if !name.is_empty() && name != UNTESTED => (name, row.color_hex),
            _ => (UNTESTED.to_string(), None),
        };
        let count = non_negative(row.case_count);
        match merged.iter_mut().find(|(n, _, _)| *n == name) {
            Some(entry) => entry.2 += count,
            None => merged.push((name, color, count)),
        }
    }

    let total: u64 = merged.iter().map(|(_, _, c)| c).sum();
    merged
        .into_iter()
        .map(|(name, color, count)| StatusShare {
            name,
            color,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

/// Organization-wide summary.
pub fn summarize_organization(
    counts: OrgCountsRow,
    roles: Vec<RoleCountRow>,
    statuses: Vec<StatusCountRow>,
) -> AnalyticsSummary {
    let test_runs = non_negative(counts.test_run_count);
    let run_cases = non_negative(counts.run_case_count);

    AnalyticsSummary {
        scope: AnalyticsScope::Organization,
        project_id: None,
        totals: AnalyticsTotals {
            projects: Some(non_negative(counts.project_count)),
            test_cases: non_negative(counts.test_case_count),
            test_runs,
            users: Some(non_negative(counts.user_count)),
            run_cases,
        },
        users_by_role: Some(role_shares(roles)),
        average_cases_per_run: average_cases_per_run(run_cases, test_runs),
        status_distribution: status_shares(statuses),
    }
}

/// Summary for a single project.
pub fn summarize_project(
    project_id: i64,
    counts: ProjectCountsRow,
    statuses: Vec<StatusCountRow>,
) -> AnalyticsSummary {
    let test_runs = non_negative(counts.test_run_count);
    let run_cases = non_negative(counts.run_case_count);

    AnalyticsSummary {
        scope: AnalyticsScope::Project,
        project_id: Some(project_id),
        totals: AnalyticsTotals {
            projects: None,
            test_cases: non_negative(counts.test_case_count),
            test_runs,
            users: None,
            run_cases,
        },
        users_by_role: None,
        average_cases_per_run: average_cases_per_run(run_cases, test_runs),
        status_distribution: status_shares(statuses),
    }
}
