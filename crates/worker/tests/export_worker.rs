//! Integration test for the export render loop against a real database.

use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use tempo_db::models::project::CreateProject;
use tempo_db::models::time_entry::CreateTimeEntry;
use tempo_db::models::user::CreateUser;
use tempo_db::repositories::{
    ExportJobRepo, ProjectRepo, ReportExportRepo, TimeEntryRepo, UserRepo,
};
use tempo_db::models::report_export::CreateReportExport;
use tempo_worker::export_worker::ExportWorker;
use tokio_util::sync::CancellationToken;

/// Queue one export by hand and let the worker loop pick it up.
#[sqlx::test(migrations = "../../db/migrations")]
async fn worker_renders_queued_export(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            email: "worker@example.com".to_string(),
            full_name: None,
            password_hash: "$argon2id$fake".to_string(),
            timezone: "UTC".to_string(),
        },
    )
    .await
    .unwrap();

    let project = ProjectRepo::create(
        &pool,
        user.id,
        &CreateProject {
            name: "Website".to_string(),
            description: None,
            color: None,
        },
    )
    .await
    .unwrap();

    TimeEntryRepo::create(
        &pool,
        user.id,
        &CreateTimeEntry {
            project_id: project.id,
            description: None,
            started_at: Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            ended_at: None,
            duration_minutes: 45,
            is_billable: true,
            hourly_rate: None,
        },
    )
    .await
    .unwrap();

    let export = ReportExportRepo::create(
        &pool,
        user.id,
        &CreateReportExport {
            project_ids: None,
            date_from: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            format: "csv".to_string(),
        },
    )
    .await
    .unwrap();
    ExportJobRepo::enqueue(&pool, export.id).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let worker = ExportWorker::new(
        pool.clone(),
        dir.path().to_path_buf(),
        Duration::from_millis(50),
    );

    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(async move {
        worker.run(run_cancel).await;
    });

    // Give the loop a few ticks to claim and render.
    tokio::time::sleep(Duration::from_millis(500)).await;
    cancel.cancel();
    handle.await.unwrap();

    let export = ReportExportRepo::find_by_id(&pool, export.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(export.status, "completed");
    assert!(std::path::Path::new(export.file_path.as_deref().unwrap()).exists());

    // The queue row is consumed.
    assert!(ExportJobRepo::claim_next(&pool).await.unwrap().is_none());
}
