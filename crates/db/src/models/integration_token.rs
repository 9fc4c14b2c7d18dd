//! Integration token entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tempo_core::types::{DbId, Timestamp};

/// A row from the `integration_tokens` table.
///
/// `access_token` is never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IntegrationToken {
    pub id: DbId,
    pub user_id: DbId,
    pub provider: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub details: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a token. One row exists per user + provider.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertIntegrationToken {
    pub provider: String,
    pub access_token: String,
    pub details: Option<String>,
}
