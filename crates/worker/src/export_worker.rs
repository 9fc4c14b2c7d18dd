//! Export render loop.
//!
//! Polls the `export_jobs` queue and renders claimed exports. Claiming
//! uses `SELECT FOR UPDATE SKIP LOCKED` via
//! [`ExportJobRepo::claim_next`] to prevent double-processing across
//! concurrent workers.

use std::path::PathBuf;
use std::time::Duration;

use sqlx::PgPool;
use tempo_db::repositories::ExportJobRepo;
use tempo_reports::render_export;
use tokio_util::sync::CancellationToken;

/// Background export renderer.
///
/// A single long-lived Tokio task that drains the export queue each tick.
pub struct ExportWorker {
    pool: PgPool,
    export_dir: PathBuf,
    poll_interval: Duration,
}

impl ExportWorker {
    pub fn new(pool: PgPool, export_dir: PathBuf, poll_interval: Duration) -> Self {
        Self {
            pool,
            export_dir,
            poll_interval,
        }
    }

    /// Run the render loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            export_dir = %self.export_dir.display(),
            "Export worker started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Export worker shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.drain_queue().await {
                        tracing::error!(error = %e, "Export render cycle failed");
                    }
                }
            }
        }
    }

    /// One cycle: claim and render jobs until the queue is empty.
    ///
    /// Render-level failures are recorded on the export row inside
    /// [`render_export`]; only infrastructure errors propagate, leaving
    /// the claimed job without `completed_at` for later inspection.
    async fn drain_queue(&self) -> Result<(), tempo_reports::ReportError> {
        while let Some(job) = ExportJobRepo::claim_next(&self.pool).await? {
            tracing::info!(job_id = job.id, export_id = job.export_id, "Export job claimed");

            render_export(&self.pool, job.export_id, &self.export_dir).await?;
            ExportJobRepo::mark_done(&self.pool, job.id).await?;

            tracing::info!(job_id = job.id, export_id = job.export_id, "Export job finished");
        }
        Ok(())
    }
}
