//! Testbench server library.
//!
//! Test case management over a relational store that is reached only through
//! stored procedures: projects, test cases with ordered steps, test runs,
//! execution statuses and analytics.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
