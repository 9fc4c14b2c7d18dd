//! Repository for the `report_exports` table.
//!
//! Status transitions are guarded in SQL so a terminal state can never be
//! left: `mark_completed` refuses to touch a `failed` row and vice versa.
//! Re-marking the same terminal state is allowed (duplicate render delivery
//! is idempotent by overwrite).

use sqlx::PgPool;
use tempo_core::types::DbId;

use crate::models::report_export::{CreateReportExport, ReportExport};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, project_ids, date_from, date_to, format, status, \
     file_path, job_id, created_at, updated_at";

/// Provides lifecycle operations for report exports.
pub struct ReportExportRepo;

impl ReportExportRepo {
    /// Persist a new export request with status `pending`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateReportExport,
    ) -> Result<ReportExport, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_exports (user_id, project_ids, date_from, date_to, format)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportExport>(&query)
            .bind(user_id)
            .bind(&input.project_ids)
            .bind(input.date_from)
            .bind(input.date_to)
            .bind(&input.format)
            .fetch_one(pool)
            .await
    }

    /// Find an export by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ReportExport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM report_exports WHERE id = $1");
        sqlx::query_as::<_, ReportExport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's exports, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ReportExport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM report_exports
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ReportExport>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record the queue handle returned by a successful enqueue.
    pub async fn set_job_id(
        pool: &PgPool,
        id: DbId,
        job_id: DbId,
    ) -> Result<Option<ReportExport>, sqlx::Error> {
        let query = format!(
            "UPDATE report_exports SET job_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportExport>(&query)
            .bind(id)
            .bind(job_id)
            .fetch_optional(pool)
            .await
    }

    /// Transition to `completed` with the rendered artifact path.
    ///
    /// Never touches a `failed` row.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        file_path: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE report_exports
             SET status = 'completed', file_path = $2, updated_at = NOW()
             WHERE id = $1 AND status <> 'failed'",
        )
        .bind(id)
        .bind(file_path)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Transition to `failed`. Never touches a `completed` row, and clears
    /// `file_path` to preserve the completed-iff-path invariant.
    pub async fn mark_failed(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE report_exports
             SET status = 'failed', file_path = NULL, updated_at = NOW()
             WHERE id = $1 AND status <> 'completed'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
