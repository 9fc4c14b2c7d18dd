use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tempo_worker::config::WorkerConfig;
use tempo_worker::export_worker::ExportWorker;
use tempo_worker::reminders::ReminderScheduler;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempo_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env();
    tracing::info!(export_dir = %config.export_dir.display(), "Loaded worker configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = tempo_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    tempo_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    // Migrations are owned by the API server; the worker only needs the
    // schema to already exist.

    // --- Background loops ---
    let cancel = CancellationToken::new();

    let export_worker = ExportWorker::new(
        pool.clone(),
        config.export_dir.clone(),
        config.poll_interval,
    );
    let export_cancel = cancel.clone();
    let export_handle = tokio::spawn(async move {
        export_worker.run(export_cancel).await;
    });

    let reminder_scheduler = ReminderScheduler::new(pool.clone(), config.reminder_interval);
    let reminder_cancel = cancel.clone();
    let reminder_handle = tokio::spawn(async move {
        reminder_scheduler.run(reminder_cancel).await;
    });

    // --- Wait for termination ---
    shutdown_signal().await;
    cancel.cancel();

    let _ = tokio::time::timeout(Duration::from_secs(10), export_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(10), reminder_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the worker
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
