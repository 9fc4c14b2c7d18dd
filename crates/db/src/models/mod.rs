pub mod integration_token;
pub mod project;
pub mod reminder;
pub mod report_export;
pub mod session;
pub mod time_entry;
pub mod user;
