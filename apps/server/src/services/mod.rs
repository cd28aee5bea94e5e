//! Business logic services.

pub mod analytics;
pub mod run_progress;
pub mod test_cases;
pub mod test_runs;
