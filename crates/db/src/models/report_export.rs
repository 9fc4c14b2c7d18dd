//! Report export entity model and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use tempo_core::types::{DbId, Timestamp};

/// A row from the `report_exports` table.
///
/// Captures both the export *request* (filters + format) and its
/// *execution state*. Rows are never deleted by the system; they remain
/// queryable by the owner as an audit trail.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportExport {
    pub id: DbId,
    pub user_id: DbId,
    /// Optional project-id subset the report is restricted to.
    pub project_ids: Option<Vec<DbId>>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// `csv` or `pdf`.
    pub format: String,
    /// `pending`, `completed`, or `failed`. Monotonic; see migration CHECKs.
    pub status: String,
    /// Set if and only if `status` is `completed`.
    pub file_path: Option<String>,
    /// Queue handle recorded after a successful enqueue.
    pub job_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for persisting a new pending export request.
#[derive(Debug, Clone)]
pub struct CreateReportExport {
    pub project_ids: Option<Vec<DbId>>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub format: String,
}

/// A row from the `export_jobs` queue table.
#[derive(Debug, Clone, FromRow)]
pub struct ExportJob {
    pub id: DbId,
    pub export_id: DbId,
    pub queued_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}
