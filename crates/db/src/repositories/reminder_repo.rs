//! Repository for the `reminders` table.

use sqlx::PgPool;
use tempo_core::types::DbId;

use crate::models::reminder::{CreateReminder, Reminder, UpdateReminder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, label, cron_expression, channel, is_active, created_at, updated_at";

/// Provides CRUD operations for reminders.
pub struct ReminderRepo;

impl ReminderRepo {
    /// Insert a new reminder owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateReminder,
    ) -> Result<Reminder, sqlx::Error> {
        let query = format!(
            "INSERT INTO reminders (user_id, label, cron_expression, channel, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(user_id)
            .bind(&input.label)
            .bind(&input.cron_expression)
            .bind(&input.channel)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a reminder by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reminders WHERE id = $1");
        sqlx::query_as::<_, Reminder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's active reminders.
    pub async fn list_active_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Reminder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reminders
             WHERE user_id = $1 AND is_active = TRUE
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List every active reminder across all users (worker dispatch loop).
    pub async fn list_all_active(pool: &PgPool) -> Result<Vec<Reminder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reminders WHERE is_active = TRUE ORDER BY id ASC"
        );
        sqlx::query_as::<_, Reminder>(&query).fetch_all(pool).await
    }

    /// Update a reminder. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReminder,
    ) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!(
            "UPDATE reminders SET
                label = COALESCE($2, label),
                cron_expression = COALESCE($3, cron_expression),
                channel = COALESCE($4, channel),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.cron_expression)
            .bind(&input.channel)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a reminder. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
