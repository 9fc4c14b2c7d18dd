//! Handlers for the `/integrations` resource (external service tokens).

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tempo_core::error::CoreError;
use tempo_db::models::integration_token::{IntegrationToken, UpsertIntegrationToken};
use tempo_db::repositories::IntegrationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /integrations/{provider}`.
#[derive(Debug, Deserialize)]
pub struct UpsertRequest {
    pub access_token: String,
    /// Free-form provider metadata (e.g. workspace name) stored verbatim.
    pub details: Option<String>,
}

/// GET /api/v1/integrations
///
/// List the caller's connected integrations. Access tokens are never
/// serialized into the response.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<IntegrationToken>>> {
    let tokens = IntegrationRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(tokens))
}

/// PUT /api/v1/integrations/{provider}
///
/// Connect or reconnect a provider. One token per (user, provider);
/// a repeat call replaces the stored token.
pub async fn upsert(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(provider): Path<String>,
    Json(input): Json<UpsertRequest>,
) -> AppResult<Json<IntegrationToken>> {
    let provider = provider.trim().to_lowercase();
    if provider.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Provider must not be empty".into(),
        )));
    }
    if input.access_token.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "access_token must not be empty".into(),
        )));
    }

    let token = IntegrationRepo::upsert(
        &state.pool,
        auth_user.user_id,
        &UpsertIntegrationToken {
            provider,
            access_token: input.access_token,
            details: input.details,
        },
    )
    .await?;
    Ok(Json(token))
}
