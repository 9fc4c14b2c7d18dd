//! On-demand report computation.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tempo_core::report::{aggregate, day_bounds, ReportResponse};
use tempo_core::types::DbId;
use tempo_db::repositories::{ProjectRepo, TimeEntryRepo};

use crate::error::ReportError;
use crate::scope::validate_project_scope;

/// Filters accepted by both the summary endpoint and export requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportFilters {
    /// Restrict the report to these projects. `None` means all of the
    /// user's projects.
    pub project_ids: Option<Vec<DbId>>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Compute a per-project time report for `user_id` over the filter window.
///
/// The date range is inclusive on both ends and expanded to whole UTC
/// days. Entries are fetched in `(started_at, id)` order so the grouped
/// output is deterministic for a given data set.
pub async fn summarize(
    pool: &PgPool,
    user_id: DbId,
    filters: &ReportFilters,
) -> Result<ReportResponse, ReportError> {
    // An explicit empty list means "no restriction", same as absent.
    let project_ids = filters
        .project_ids
        .as_deref()
        .filter(|ids| !ids.is_empty());

    if let Some(ids) = project_ids {
        validate_project_scope(pool, user_id, ids).await?;
    }

    let (range_start, range_end) = day_bounds(filters.date_from, filters.date_to)?;

    let entries =
        TimeEntryRepo::list_for_report(pool, user_id, project_ids, range_start, range_end).await?;

    let mut referenced: Vec<DbId> = entries.iter().map(|e| e.project_id).collect();
    referenced.sort_unstable();
    referenced.dedup();

    let names: HashMap<DbId, String> = ProjectRepo::find_by_ids(pool, &referenced)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let report_entries: Vec<_> = entries.iter().map(|e| e.report_entry()).collect();
    Ok(aggregate(&report_entries, &names))
}
