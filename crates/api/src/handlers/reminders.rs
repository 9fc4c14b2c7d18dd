//! Handlers for the `/reminders` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tempo_core::error::CoreError;
use tempo_core::types::DbId;
use tempo_db::models::reminder::{CreateReminder, Reminder, UpdateReminder};
use tempo_db::repositories::ReminderRepo;
use tempo_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

async fn find_owned(pool: &DbPool, id: DbId, user_id: DbId) -> AppResult<Reminder> {
    ReminderRepo::find_by_id(pool, id)
        .await?
        .filter(|r| r.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "reminder",
            id,
        }))
}

/// GET /api/v1/reminders
///
/// List the caller's active reminders.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Reminder>>> {
    let reminders = ReminderRepo::list_active_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(reminders))
}

/// POST /api/v1/reminders
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateReminder>,
) -> AppResult<(StatusCode, Json<Reminder>)> {
    if input.label.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Reminder label must not be empty".into(),
        )));
    }
    let reminder = ReminderRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// PATCH /api/v1/reminders/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReminder>,
) -> AppResult<Json<Reminder>> {
    find_owned(&state.pool, id, auth_user.user_id).await?;
    let reminder = ReminderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "reminder",
            id,
        }))?;
    Ok(Json(reminder))
}

/// DELETE /api/v1/reminders/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state.pool, id, auth_user.user_id).await?;
    ReminderRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
