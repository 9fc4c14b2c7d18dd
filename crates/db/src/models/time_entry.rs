//! Time entry entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tempo_core::report::ReportEntry;
use tempo_core::types::{DbId, Timestamp};

/// A row from the `time_entries` table.
///
/// `duration_minutes` is authoritative: it is never derived from the
/// `started_at`/`ended_at` window, and reports only ever read it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub description: Option<String>,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub duration_minutes: i32,
    pub is_billable: bool,
    pub hourly_rate: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TimeEntry {
    /// The slice of this entry that report aggregation consumes.
    pub fn report_entry(&self) -> ReportEntry {
        ReportEntry {
            project_id: self.project_id,
            duration_minutes: self.duration_minutes,
            is_billable: self.is_billable,
        }
    }
}

/// DTO for logging a new time entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeEntry {
    pub project_id: DbId,
    pub description: Option<String>,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub duration_minutes: i32,
    #[serde(default = "default_billable")]
    pub is_billable: bool,
    pub hourly_rate: Option<f64>,
}

fn default_billable() -> bool {
    true
}

/// DTO for partially updating a time entry. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimeEntry {
    pub project_id: Option<DbId>,
    pub description: Option<String>,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub is_billable: Option<bool>,
    pub hourly_rate: Option<f64>,
}
