//! Handlers for the `/reports` resource: on-demand summaries and the
//! asynchronous export lifecycle.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tempo_core::error::CoreError;
use tempo_core::report::ReportResponse;
use tempo_core::types::DbId;
use tempo_db::models::report_export::ReportExport;
use tempo_db::repositories::ReportExportRepo;
use tempo_reports::{summarize, ExportCoordinator, ExportRequest, ReportFilters};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/reports/summary
///
/// Compute a per-project time report over an inclusive date range.
/// Filters arrive in the body so `project_ids` can be a real array.
pub async fn summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(filters): Json<ReportFilters>,
) -> AppResult<Json<ReportResponse>> {
    let response = summarize(&state.pool, auth_user.user_id, &filters).await?;
    Ok(Json(response))
}

/// POST /api/v1/reports/export
///
/// Accept an export request for asynchronous rendering. Returns 202 with
/// the `pending` export row; poll `GET /reports/exports/{id}` for the
/// outcome. If the job queue is down the row is recorded as `failed` and
/// the request fails with 503.
pub async fn request_export(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ExportRequest>,
) -> AppResult<(StatusCode, Json<ReportExport>)> {
    let coordinator = ExportCoordinator::new(state.pool.clone(), state.export_queue.clone());
    let export = coordinator.request_export(auth_user.user_id, &input).await?;
    Ok((StatusCode::ACCEPTED, Json(export)))
}

/// GET /api/v1/reports/exports
///
/// List the caller's export history, newest first.
pub async fn list_exports(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<ReportExport>>> {
    let exports = ReportExportRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(exports))
}

/// GET /api/v1/reports/exports/{id}
///
/// Fetch one export. Another user's export behaves like a missing one.
pub async fn get_export(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReportExport>> {
    let export = ReportExportRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|e| e.user_id == auth_user.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "report_export",
            id,
        }))?;
    Ok(Json(export))
}
