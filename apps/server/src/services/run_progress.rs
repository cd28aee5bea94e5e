//! Run progress aggregation.
//!
//! Progress is recomputed on every read from the run's case rows; nothing is
//! stored. Two readers of the same rows must always see the same numbers.

use crate::models::{RunCaseRow, RunProgress, RunSummary, StatusCount, UNTESTED};

/// Minimal view of a run case needed for aggregation.
pub trait StatusLabel {
    fn status_name(&self) -> Option<&str>;
    fn color_hex(&self) -> Option<&str>;
}

impl StatusLabel for RunCaseRow {
    fn status_name(&self) -> Option<&str> {
        self.status_name.as_deref()
    }

    fn color_hex(&self) -> Option<&str> {
        self.color_hex.as_deref()
    }
}

/// Group rows by status label.
///
/// - `total` counts every row.
/// - A missing, empty or `UNTESTED` label lands in the `UNTESTED` group with
///   no color.
/// - Other groups take the color of their first row.
/// - Groups keep first-seen order.
pub fn aggregate<R: StatusLabel>(rows: &[R]) -> RunSummary {
    let mut by_status: Vec<StatusCount> = Vec::new();

    for row in rows {
        let (name, color) = match row.status_name() {
            Some(label) if !label.is_empty() && label != UNTESTED => {
                (label, row.color_hex().map(str::to_string))
            }
            _ => (UNTESTED, None),
        };

        // Runs hold a handful of distinct labels; a linear scan keeps order for free.
        match by_status.iter_mut().find(|group| group.name == name) {
            Some(group) => group.count += 1,
            None => by_status.push(StatusCount {
                name: name.to_string(),
                color,
                count: 1,
            }),
        }
    }

    RunSummary {
        total: rows.len() as u64,
        by_status,
    }
}

impl RunSummary {
    /// Number of cases in the `UNTESTED` group.
    pub fn untested(&self) -> u64 {
        self.by_status
            .iter()
            .find(|group| group.name == UNTESTED)
            .map_or(0, |group| group.count)
    }

    /// Completed count and whole percent, rounded half up; 0 for an empty run.
    pub fn progress(&self) -> RunProgress {
        let completed = self.total - self.untested();
        let percent = if self.total == 0 {
            0
        } else {
            (completed * 200 + self.total) / (self.total * 2)
        };
        RunProgress { completed, percent }
    }
}
