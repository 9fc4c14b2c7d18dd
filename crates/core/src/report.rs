//! Pure report-aggregation core.
//!
//! Everything in this module is side-effect free: the API server and the
//! export worker both feed persisted time entries through [`aggregate`]
//! and get back the same [`ReportResponse`] for the same input.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Name rendered for a project id that no longer resolves to a project row.
///
/// Cascade deletes should make this unreachable in practice; it is handled
/// defensively so a report never fails on a dangling project reference.
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown";

/// Target format of a report export artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    /// File extension used in the artifact naming convention.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(CoreError::Validation(format!(
                "Unknown export format: {other}"
            ))),
        }
    }
}

/// Lifecycle state of a report export.
///
/// Transitions are monotonic: `Pending` -> `Completed` | `Failed`, and a
/// terminal state is never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Pending,
    Completed,
    Failed,
}

impl ExportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportStatus::Pending => "pending",
            ExportStatus::Completed => "completed",
            ExportStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ExportStatus::Completed | ExportStatus::Failed)
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ExportStatus::Pending),
            "completed" => Ok(ExportStatus::Completed),
            "failed" => Ok(ExportStatus::Failed),
            other => Err(CoreError::Internal(format!(
                "Unknown export status: {other}"
            ))),
        }
    }
}

/// The slice of a time entry that report aggregation looks at.
#[derive(Debug, Clone, Copy)]
pub struct ReportEntry {
    pub project_id: DbId,
    /// Authoritative duration. Never recomputed from the entry's window.
    pub duration_minutes: i32,
    pub is_billable: bool,
}

/// Per-project totals within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub project_id: DbId,
    pub project_name: String,
    pub total_minutes: i64,
    pub total_billable_minutes: i64,
}

/// A computed report: per-project summaries plus grand totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub summary: Vec<ReportSummary>,
    pub total_minutes: i64,
    pub total_billable_minutes: i64,
}

/// Expand an inclusive calendar-date range into an inclusive instant range.
///
/// `date_from` maps to start-of-day and `date_to` to 23:59:59.999999 (UTC),
/// so a single-day report captures entries anywhere within that day.
/// Returns a validation error when `date_from > date_to`; the schema layer
/// rejects that earlier, this is a defensive backstop.
pub fn day_bounds(
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<(Timestamp, Timestamp), CoreError> {
    if date_from > date_to {
        return Err(CoreError::Validation(
            "date_from must not be after date_to".to_string(),
        ));
    }

    let start = date_from
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CoreError::Internal("invalid start-of-day timestamp".to_string()))?
        .and_utc();
    let end = date_to
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .ok_or_else(|| CoreError::Internal("invalid end-of-day timestamp".to_string()))?
        .and_utc();

    Ok((start, end))
}

/// Group time entries by project and compute per-project and grand totals.
///
/// Projects appear in first-occurrence order of the input entries. A project
/// id missing from `project_names` renders as [`UNKNOWN_PROJECT_NAME`].
pub fn aggregate(
    entries: &[ReportEntry],
    project_names: &HashMap<DbId, String>,
) -> ReportResponse {
    let mut buckets: IndexMap<DbId, (i64, i64)> = IndexMap::new();
    for entry in entries {
        let bucket = buckets.entry(entry.project_id).or_insert((0, 0));
        bucket.0 += i64::from(entry.duration_minutes);
        if entry.is_billable {
            bucket.1 += i64::from(entry.duration_minutes);
        }
    }

    let summary: Vec<ReportSummary> = buckets
        .into_iter()
        .map(|(project_id, (total, billable))| ReportSummary {
            project_id,
            project_name: project_names
                .get(&project_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_PROJECT_NAME.to_string()),
            total_minutes: total,
            total_billable_minutes: billable,
        })
        .collect();

    let total_minutes = summary.iter().map(|s| s.total_minutes).sum();
    let total_billable_minutes = summary.iter().map(|s| s.total_billable_minutes).sum();

    ReportResponse {
        summary,
        total_minutes,
        total_billable_minutes,
    }
}

/// Artifact naming convention: `report_{export_id}.{csv|pdf}`.
///
/// External tooling polls the storage path by this pattern; keep it stable.
pub fn export_filename(export_id: DbId, format: ExportFormat) -> String {
    format!("report_{export_id}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(project_id: DbId, duration_minutes: i32, is_billable: bool) -> ReportEntry {
        ReportEntry {
            project_id,
            duration_minutes,
            is_billable,
        }
    }

    fn names(pairs: &[(DbId, &str)]) -> HashMap<DbId, String> {
        pairs
            .iter()
            .map(|(id, name)| (*id, name.to_string()))
            .collect()
    }

    #[test]
    fn test_same_project_entries_accumulate() {
        let report = aggregate(
            &[entry(1, 30, true), entry(1, 45, true)],
            &names(&[(1, "Reporting")]),
        );

        assert_eq!(report.summary.len(), 1);
        assert_eq!(report.summary[0].project_name, "Reporting");
        assert_eq!(report.summary[0].total_minutes, 75);
        assert_eq!(report.summary[0].total_billable_minutes, 75);
        assert_eq!(report.total_minutes, 75);
        assert_eq!(report.total_billable_minutes, 75);
    }

    #[test]
    fn test_non_billable_counts_toward_total_only() {
        let report = aggregate(
            &[entry(1, 60, false), entry(1, 15, true)],
            &names(&[(1, "Mixed")]),
        );

        assert_eq!(report.summary[0].total_minutes, 75);
        assert_eq!(report.summary[0].total_billable_minutes, 15);
    }

    #[test]
    fn test_grand_totals_equal_sum_of_per_project_totals() {
        let report = aggregate(
            &[
                entry(1, 10, true),
                entry(2, 20, false),
                entry(1, 30, false),
                entry(3, 40, true),
            ],
            &names(&[(1, "A"), (2, "B"), (3, "C")]),
        );

        let per_project_total: i64 = report.summary.iter().map(|s| s.total_minutes).sum();
        let per_project_billable: i64 = report
            .summary
            .iter()
            .map(|s| s.total_billable_minutes)
            .sum();
        assert_eq!(report.total_minutes, per_project_total);
        assert_eq!(report.total_billable_minutes, per_project_billable);
        assert_eq!(report.total_minutes, 100);
        assert_eq!(report.total_billable_minutes, 50);
    }

    #[test]
    fn test_projects_keep_first_occurrence_order() {
        let report = aggregate(
            &[entry(7, 5, true), entry(3, 5, true), entry(7, 5, true)],
            &names(&[(3, "Three"), (7, "Seven")]),
        );

        let ids: Vec<DbId> = report.summary.iter().map(|s| s.project_id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_missing_project_name_renders_unknown() {
        let report = aggregate(&[entry(99, 10, true)], &HashMap::new());
        assert_eq!(report.summary[0].project_name, UNKNOWN_PROJECT_NAME);
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = aggregate(&[], &HashMap::new());
        assert!(report.summary.is_empty());
        assert_eq!(report.total_minutes, 0);
        assert_eq!(report.total_billable_minutes, 0);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let entries = [entry(1, 30, true), entry(2, 15, false), entry(1, 5, true)];
        let name_map = names(&[(1, "A"), (2, "B")]);

        let first = aggregate(&entries, &name_map);
        let second = aggregate(&entries, &name_map);
        assert_eq!(first, second);
    }

    #[test]
    fn test_day_bounds_single_day_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = day_bounds(day, day).unwrap();

        assert_eq!(start.to_rfc3339(), "2024-03-15T00:00:00+00:00");
        assert!(end > start);
        // The whole calendar day falls inside the expanded range.
        let noon = day.and_hms_opt(12, 0, 0).unwrap().and_utc();
        let last_second = day.and_hms_opt(23, 59, 59).unwrap().and_utc();
        assert!(noon >= start && noon <= end);
        assert!(last_second >= start && last_second <= end);
        // Midnight of the next day does not.
        let next_midnight = day.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();
        assert!(next_midnight > end);
    }

    #[test]
    fn test_day_bounds_rejects_inverted_range() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(matches!(
            day_bounds(from, to),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_export_filename_convention() {
        assert_eq!(export_filename(42, ExportFormat::Csv), "report_42.csv");
        assert_eq!(export_filename(7, ExportFormat::Pdf), "report_7.pdf");
    }

    #[test]
    fn test_export_status_round_trip_and_terminality() {
        for status in [
            ExportStatus::Pending,
            ExportStatus::Completed,
            ExportStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<ExportStatus>().unwrap(), status);
        }
        assert!(!ExportStatus::Pending.is_terminal());
        assert!(ExportStatus::Completed.is_terminal());
        assert!(ExportStatus::Failed.is_terminal());
    }
}
