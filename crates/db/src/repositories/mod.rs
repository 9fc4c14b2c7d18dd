pub mod export_job_repo;
pub mod integration_repo;
pub mod project_repo;
pub mod reminder_repo;
pub mod report_export_repo;
pub mod session_repo;
pub mod time_entry_repo;
pub mod user_repo;

pub use export_job_repo::ExportJobRepo;
pub use integration_repo::IntegrationRepo;
pub use project_repo::ProjectRepo;
pub use reminder_repo::ReminderRepo;
pub use report_export_repo::ReportExportRepo;
pub use session_repo::SessionRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use user_repo::UserRepo;
