//! Repository for the `integration_tokens` table.

use sqlx::PgPool;
use tempo_core::types::DbId;

use crate::models::integration_token::{IntegrationToken, UpsertIntegrationToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, provider, access_token, details, created_at, updated_at";

/// Provides upsert/list operations for integration tokens.
pub struct IntegrationRepo;

impl IntegrationRepo {
    /// Insert or replace the token for `user_id` + provider.
    ///
    /// Relies on `uq_integration_tokens_user_provider` for the one-token-
    /// per-provider rule.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertIntegrationToken,
    ) -> Result<IntegrationToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO integration_tokens (user_id, provider, access_token, details)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_integration_tokens_user_provider
             DO UPDATE SET access_token = EXCLUDED.access_token,
                           details = EXCLUDED.details,
                           updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IntegrationToken>(&query)
            .bind(user_id)
            .bind(&input.provider)
            .bind(&input.access_token)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// List a user's integration tokens.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<IntegrationToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM integration_tokens WHERE user_id = $1 ORDER BY provider ASC"
        );
        sqlx::query_as::<_, IntegrationToken>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
