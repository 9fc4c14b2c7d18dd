//! Domain types, error taxonomy, and the pure report-aggregation core.
//!
//! This crate has no database or HTTP dependencies so the aggregation
//! logic can be tested in isolation and shared between the API server
//! and the export worker.

pub mod error;
pub mod report;
pub mod types;
