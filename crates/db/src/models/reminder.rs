//! Reminder entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tempo_core::types::{DbId, Timestamp};

/// A row from the `reminders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reminder {
    pub id: DbId,
    pub user_id: DbId,
    pub label: String,
    pub cron_expression: String,
    pub channel: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a reminder.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReminder {
    pub label: String,
    pub cron_expression: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_channel() -> String {
    "email".to_string()
}

fn default_active() -> bool {
    true
}

/// DTO for partially updating a reminder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReminder {
    pub label: Option<String>,
    pub cron_expression: Option<String>,
    pub channel: Option<String>,
    pub is_active: Option<bool>,
}
