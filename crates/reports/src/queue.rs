//! Queue abstraction for export render jobs.
//!
//! The coordinator only needs "hand me a job handle or tell me you are
//! down", so the backend sits behind a trait. The production backend is
//! the `export_jobs` table; tests substitute an always-failing queue to
//! exercise the enqueue-failure path.

use async_trait::async_trait;
use tempo_core::types::DbId;
use tempo_db::repositories::ExportJobRepo;
use tempo_db::DbPool;

/// Errors from the queue backend.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("export queue unavailable: {0}")]
    Unavailable(String),
}

/// Accepts export render jobs for asynchronous processing.
#[async_trait]
pub trait ExportQueue: Send + Sync {
    /// Enqueue a render job for `export_id`, returning the job handle.
    async fn enqueue(&self, export_id: DbId) -> Result<DbId, QueueError>;
}

/// The database-backed queue: one row per job in `export_jobs`, claimed
/// by workers with `SKIP LOCKED`.
pub struct PgExportQueue {
    pool: DbPool,
}

impl PgExportQueue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExportQueue for PgExportQueue {
    async fn enqueue(&self, export_id: DbId) -> Result<DbId, QueueError> {
        ExportJobRepo::enqueue(&self.pool, export_id)
            .await
            .map_err(|e| QueueError::Unavailable(e.to_string()))
    }
}
