//! Export job lifecycle: request on the API side, render on the worker
//! side.
//!
//! `request_export` and `render_export` are the only writers of export
//! status. Transitions are monotonic (`pending` to exactly one of
//! `completed`/`failed`) and the guards live in
//! [`tempo_db::repositories::ReportExportRepo`], so duplicate delivery of
//! the same job is harmless.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use tempo_core::error::CoreError;
use tempo_core::report::{day_bounds, export_filename, ExportFormat, ExportStatus};
use tempo_core::types::DbId;
use tempo_db::models::report_export::{CreateReportExport, ReportExport};
use tempo_db::repositories::{ReportExportRepo, UserRepo};
use tempo_db::DbPool;
use tracing::{error, info, warn};

use crate::error::ReportError;
use crate::queue::ExportQueue;
use crate::render::render_report;
use crate::scope::validate_project_scope;
use crate::summary::{summarize, ReportFilters};

/// An incoming request to export a report.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    pub project_ids: Option<Vec<DbId>>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub format: ExportFormat,
}

/// Accepts export requests: validates, persists a `pending` row, and
/// enqueues a render job.
///
/// The queue backend is injected at construction so the HTTP layer never
/// sees it and tests can substitute a failing one.
pub struct ExportCoordinator {
    pool: DbPool,
    queue: Arc<dyn ExportQueue>,
}

impl ExportCoordinator {
    pub fn new(pool: DbPool, queue: Arc<dyn ExportQueue>) -> Self {
        Self { pool, queue }
    }

    /// Validate and accept an export request.
    ///
    /// On success the returned row is `pending` with a recorded job id.
    /// If the queue refuses the job, the row is marked `failed` before
    /// the error propagates, so no export is ever stranded in `pending`
    /// without a job behind it.
    pub async fn request_export(
        &self,
        user_id: DbId,
        request: &ExportRequest,
    ) -> Result<ReportExport, ReportError> {
        // An explicit empty list means "no restriction"; store it as NULL
        // so the render side sees the same thing.
        let project_ids = request
            .project_ids
            .clone()
            .filter(|ids| !ids.is_empty());

        if let Some(ids) = &project_ids {
            validate_project_scope(&self.pool, user_id, ids).await?;
        }
        // Range validation only; the bounds themselves are recomputed at
        // render time.
        day_bounds(request.date_from, request.date_to)?;

        let export = ReportExportRepo::create(
            &self.pool,
            user_id,
            &CreateReportExport {
                project_ids,
                date_from: request.date_from,
                date_to: request.date_to,
                format: request.format.to_string(),
            },
        )
        .await?;

        let job_id = match self.queue.enqueue(export.id).await {
            Ok(job_id) => job_id,
            Err(e) => {
                error!(export_id = export.id, error = %e, "failed to enqueue export job");
                ReportExportRepo::mark_failed(&self.pool, export.id).await?;
                return Err(CoreError::ServiceUnavailable(
                    "export queue is unavailable".to_string(),
                )
                .into());
            }
        };

        let export = ReportExportRepo::set_job_id(&self.pool, export.id, job_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "report_export",
                id: export.id,
            })?;

        info!(
            export_id = export.id,
            job_id,
            format = %request.format,
            "export job accepted"
        );
        Ok(export)
    }
}

/// Render a previously accepted export to a file under `export_dir`.
///
/// Runs on the worker. The report is recomputed from live data at render
/// time, so entries created or deleted between request and render are
/// reflected in the artifact. Render-side problems (bad scope by the time
/// we run, renderer failure) mark the export `failed` and return `Ok`;
/// only infrastructure errors propagate to the caller's retry logic.
pub async fn render_export(
    pool: &PgPool,
    export_id: DbId,
    export_dir: &Path,
) -> Result<(), ReportError> {
    let Some(export) = ReportExportRepo::find_by_id(pool, export_id).await? else {
        warn!(export_id, "export row missing, dropping render job");
        return Ok(());
    };

    // A row already in a terminal state is left alone; a stray or
    // duplicate delivery must not write an artifact for a failed export.
    if export
        .status
        .parse::<ExportStatus>()
        .is_ok_and(ExportStatus::is_terminal)
    {
        warn!(export_id, status = %export.status, "export already terminal, dropping render job");
        return Ok(());
    }

    let Ok(format) = export.format.parse::<ExportFormat>() else {
        error!(export_id, format = %export.format, "unknown export format");
        ReportExportRepo::mark_failed(pool, export_id).await?;
        return Ok(());
    };

    // The owner may have been deleted between request and render.
    if UserRepo::find_by_id(pool, export.user_id).await?.is_none() {
        warn!(export_id, user_id = export.user_id, "export owner no longer exists");
        ReportExportRepo::mark_failed(pool, export_id).await?;
        return Ok(());
    }

    let filters = ReportFilters {
        project_ids: export.project_ids.clone(),
        date_from: export.date_from,
        date_to: export.date_to,
    };
    let response = match summarize(pool, export.user_id, &filters).await {
        Ok(response) => response,
        Err(ReportError::Database(e)) => return Err(ReportError::Database(e)),
        Err(e) => {
            warn!(export_id, error = %e, "report no longer computable, marking export failed");
            ReportExportRepo::mark_failed(pool, export_id).await?;
            return Ok(());
        }
    };

    let path = export_dir.join(export_filename(export.id, format));
    if let Err(e) = render_report(&path, format, &export, &response) {
        error!(export_id, error = %e, "renderer failed");
        ReportExportRepo::mark_failed(pool, export_id).await?;
        return Ok(());
    }

    let path_str = path.to_string_lossy();
    ReportExportRepo::mark_completed(pool, export_id, &path_str).await?;
    info!(export_id, path = %path_str, "export rendered");
    Ok(())
}
