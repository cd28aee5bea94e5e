//! HTTP API test suite.
//!
//! Drives the real route configuration against an in-memory procedure
//! gateway, so no database is needed.
//!
//! Run with: cargo test --test api


mod test_projects;
mod test_statuses;
mod test_test_runs;
