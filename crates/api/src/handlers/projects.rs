//! Handlers for the `/projects` resource.
//!
//! All project endpoints are owner-scoped: another user's project behaves
//! exactly like a nonexistent one (404), so ids cannot be probed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tempo_core::error::CoreError;
use tempo_core::types::DbId;
use tempo_db::models::project::{CreateProject, Project, UpdateProject};
use tempo_db::repositories::ProjectRepo;
use tempo_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fetch a project and enforce ownership, mapping both "missing" and
/// "not yours" to 404.
async fn find_owned(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .filter(|p| p.owner_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))
}

/// GET /api/v1/projects
///
/// List the authenticated user's unarchived projects, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, auth_user.user_id).await?;
    Ok(Json(projects))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name must not be empty".into(),
        )));
    }
    let project = ProjectRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = find_owned(&state.pool, id, auth_user.user_id).await?;
    Ok(Json(project))
}

/// PATCH /api/v1/projects/{id}
///
/// Partial update: absent fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    find_owned(&state.pool, id, auth_user.user_id).await?;

    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Project name must not be empty".into(),
            )));
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Deleting a project archives it rather than removing the row, so its
/// time entries remain reportable. Returns 204 No Content.
pub async fn archive(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state.pool, id, auth_user.user_id).await?;
    ProjectRepo::archive(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
