//! Reminder dispatch loop.
//!
//! Periodically scans active reminders and emits a dispatch event per
//! reminder. Delivery is a structured log line; channel transports
//! (email, push) hang off the same loop when they land.

use std::time::Duration;

use sqlx::PgPool;
use tempo_db::repositories::ReminderRepo;
use tokio_util::sync::CancellationToken;

/// Background reminder scanner.
pub struct ReminderScheduler {
    pool: PgPool,
    scan_interval: Duration,
}

impl ReminderScheduler {
    pub fn new(pool: PgPool, scan_interval: Duration) -> Self {
        Self {
            pool,
            scan_interval,
        }
    }

    /// Run the scan loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.scan_interval);
        tracing::info!(
            scan_interval_ms = self.scan_interval.as_millis() as u64,
            "Reminder scheduler started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Reminder scheduler shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.scan().await {
                        tracing::error!(error = %e, "Reminder scan failed");
                    }
                }
            }
        }
    }

    async fn scan(&self) -> Result<(), sqlx::Error> {
        let reminders = ReminderRepo::list_all_active(&self.pool).await?;
        for reminder in reminders {
            tracing::info!(
                reminder_id = reminder.id,
                user_id = reminder.user_id,
                label = %reminder.label,
                channel = %reminder.channel,
                schedule = %reminder.cron_expression,
                "Reminder due for dispatch",
            );
        }
        Ok(())
    }
}
