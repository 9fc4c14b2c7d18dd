//! Repository for the `time_entries` table.

use sqlx::PgPool;
use tempo_core::types::{DbId, Timestamp};

use crate::models::time_entry::{CreateTimeEntry, TimeEntry, UpdateTimeEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_id, description, started_at, ended_at, \
     duration_minutes, is_billable, hourly_rate, created_at, updated_at";

/// Provides CRUD and filtered-list operations for time entries.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Insert a new time entry owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTimeEntry,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries
                (user_id, project_id, description, started_at, ended_at,
                 duration_minutes, is_billable, hourly_rate)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(input.project_id)
            .bind(&input.description)
            .bind(input.started_at)
            .bind(input.ended_at)
            .bind(input.duration_minutes)
            .bind(input.is_billable)
            .bind(input.hourly_rate)
            .fetch_one(pool)
            .await
    }

    /// Find a time entry by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_entries WHERE id = $1");
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's entries with optional project-set and started-at range
    /// filters, newest first. Only `started_at` gates the range; `ended_at`
    /// never participates.
    pub async fn list_filtered(
        pool: &PgPool,
        user_id: DbId,
        project_ids: Option<&[DbId]>,
        date_from: Option<Timestamp>,
        date_to: Option<Timestamp>,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE user_id = $1
               AND ($2::BIGINT[] IS NULL OR project_id = ANY($2))
               AND ($3::TIMESTAMPTZ IS NULL OR started_at >= $3)
               AND ($4::TIMESTAMPTZ IS NULL OR started_at <= $4)
             ORDER BY started_at DESC, id DESC"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(project_ids)
            .bind(date_from)
            .bind(date_to)
            .fetch_all(pool)
            .await
    }

    /// List entries feeding a report: same filters as [`Self::list_filtered`]
    /// but with a mandatory inclusive range, ordered `(started_at, id)`
    /// ascending so first-occurrence grouping is deterministic across runs.
    pub async fn list_for_report(
        pool: &PgPool,
        user_id: DbId,
        project_ids: Option<&[DbId]>,
        range_start: Timestamp,
        range_end: Timestamp,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE user_id = $1
               AND ($2::BIGINT[] IS NULL OR project_id = ANY($2))
               AND started_at >= $3
               AND started_at <= $4
             ORDER BY started_at ASC, id ASC"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(user_id)
            .bind(project_ids)
            .bind(range_start)
            .bind(range_end)
            .fetch_all(pool)
            .await
    }

    /// Update a time entry. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTimeEntry,
    ) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE time_entries SET
                project_id = COALESCE($2, project_id),
                description = COALESCE($3, description),
                started_at = COALESCE($4, started_at),
                ended_at = COALESCE($5, ended_at),
                duration_minutes = COALESCE($6, duration_minutes),
                is_billable = COALESCE($7, is_billable),
                hourly_rate = COALESCE($8, hourly_rate),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.description)
            .bind(input.started_at)
            .bind(input.ended_at)
            .bind(input.duration_minutes)
            .bind(input.is_billable)
            .bind(input.hourly_rate)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a time entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
