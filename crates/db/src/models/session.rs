//! Refresh-token session model.

use sqlx::FromRow;
use tempo_core::types::{DbId, Timestamp};

/// A row from the `sessions` table.
///
/// Only the SHA-256 hash of a refresh token is stored, never the token
/// itself.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
