//! Report aggregation and asynchronous export pipeline.
//!
//! This crate owns the two entry points the HTTP layer and the worker
//! share:
//!
//! - [`summary::summarize`] computes a per-project report on demand, and
//! - [`export::ExportCoordinator`] / [`export::render_export`] implement
//!   the request/render halves of the export job lifecycle.
//!
//! Keeping both halves here guarantees that an export renders exactly the
//! same numbers the live summary endpoint would have returned at render
//! time.

pub mod error;
pub mod export;
pub mod queue;
pub mod render;
pub mod scope;
pub mod summary;

pub use error::ReportError;
pub use export::{render_export, ExportCoordinator, ExportRequest};
pub use queue::{ExportQueue, PgExportQueue, QueueError};
pub use summary::{summarize, ReportFilters};
