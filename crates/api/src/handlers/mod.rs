pub mod auth;
pub mod integrations;
pub mod projects;
pub mod reminders;
pub mod reports;
pub mod time_entries;
