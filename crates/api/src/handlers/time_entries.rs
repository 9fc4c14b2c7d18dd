//! Handlers for the `/time-entries` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tempo_core::error::CoreError;
use tempo_core::types::{DbId, Timestamp};
use tempo_db::models::time_entry::{CreateTimeEntry, TimeEntry, UpdateTimeEntry};
use tempo_db::repositories::TimeEntryRepo;
use tempo_db::DbPool;
use tempo_reports::scope::validate_project_scope;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::parse_id_csv;
use crate::state::AppState;

/// Query parameters for `GET /time-entries`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Comma-separated project ids.
    pub project_ids: Option<String>,
    /// Inclusive lower bound on `started_at` (RFC 3339).
    pub started_after: Option<Timestamp>,
    /// Inclusive upper bound on `started_at` (RFC 3339).
    pub started_before: Option<Timestamp>,
}

/// Fetch an entry and enforce ownership; "not yours" is 404 like "missing".
async fn find_owned(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<TimeEntry> {
    TimeEntryRepo::find_by_id(pool, id)
        .await?
        .filter(|e| e.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "time_entry",
            id,
        }))
}

/// The referenced project must exist (404) and belong to the caller (403)
/// before an entry can be attached to it. Same validator the reporting
/// paths use.
async fn check_project(pool: &DbPool, project_id: DbId, user_id: DbId) -> AppResult<()> {
    validate_project_scope(pool, user_id, &[project_id]).await?;
    Ok(())
}

fn validate_duration(duration_minutes: i32) -> AppResult<()> {
    if duration_minutes <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "duration_minutes must be positive".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/time-entries
///
/// List the caller's entries, newest first, with optional project and
/// started-at range filters.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TimeEntry>>> {
    // `?project_ids=` with no ids means "no restriction", same as absent.
    let project_ids = query
        .project_ids
        .as_deref()
        .map(parse_id_csv)
        .transpose()?
        .filter(|ids| !ids.is_empty());

    let entries = TimeEntryRepo::list_filtered(
        &state.pool,
        auth_user.user_id,
        project_ids.as_deref(),
        query.started_after,
        query.started_before,
    )
    .await?;
    Ok(Json(entries))
}

/// POST /api/v1/time-entries
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateTimeEntry>,
) -> AppResult<(StatusCode, Json<TimeEntry>)> {
    validate_duration(input.duration_minutes)?;
    check_project(&state.pool, input.project_id, auth_user.user_id).await?;

    let entry = TimeEntryRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/time-entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimeEntry>> {
    let entry = find_owned(&state.pool, id, auth_user.user_id).await?;
    Ok(Json(entry))
}

/// PATCH /api/v1/time-entries/{id}
///
/// Partial update: absent fields keep their current value. Re-pointing the
/// entry at another project re-checks that project's ownership.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimeEntry>,
) -> AppResult<Json<TimeEntry>> {
    find_owned(&state.pool, id, auth_user.user_id).await?;

    if let Some(duration) = input.duration_minutes {
        validate_duration(duration)?;
    }
    if let Some(project_id) = input.project_id {
        check_project(&state.pool, project_id, auth_user.user_id).await?;
    }

    let entry = TimeEntryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "time_entry",
            id,
        }))?;
    Ok(Json(entry))
}

/// DELETE /api/v1/time-entries/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state.pool, id, auth_user.user_id).await?;
    TimeEntryRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
