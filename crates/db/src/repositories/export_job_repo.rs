//! Repository for the `export_jobs` queue table.
//!
//! A minimal at-least-once work queue: the API side enqueues, worker
//! processes claim with `FOR UPDATE SKIP LOCKED` so concurrent workers
//! never double-claim the same row.

use sqlx::PgPool;
use tempo_core::types::DbId;

use crate::models::report_export::ExportJob;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, export_id, queued_at, claimed_at, completed_at";

/// Provides enqueue/claim operations for export render jobs.
pub struct ExportJobRepo;

impl ExportJobRepo {
    /// Enqueue a render job for an export, returning the job id.
    pub async fn enqueue(pool: &PgPool, export_id: DbId) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO export_jobs (export_id) VALUES ($1) RETURNING id",
        )
        .bind(export_id)
        .fetch_one(pool)
        .await
    }

    /// Atomically claim the oldest unclaimed job.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` to prevent double-claim when
    /// multiple worker processes poll concurrently.
    pub async fn claim_next(pool: &PgPool) -> Result<Option<ExportJob>, sqlx::Error> {
        let query = format!(
            "UPDATE export_jobs
             SET claimed_at = NOW()
             WHERE id = (
                 SELECT id FROM export_jobs
                 WHERE claimed_at IS NULL
                 ORDER BY queued_at ASC, id ASC
                 LIMIT 1
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExportJob>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Record that a claimed job has been processed (successfully or not --
    /// render failures are recorded on the export row, not retried here).
    pub async fn mark_done(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE export_jobs SET completed_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
