//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use tempo_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is skipped during serialization so a `User` can never
/// leak its credential through an API response.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub timezone: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Role name embedded in JWT claims.
    pub fn role(&self) -> &'static str {
        if self.is_superuser {
            "admin"
        } else {
            "user"
        }
    }
}

/// DTO for inserting a new user (registration path).
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub timezone: String,
}
