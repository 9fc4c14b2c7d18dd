use std::path::PathBuf;
use std::time::Duration;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory export artifacts are written to (default: `storage/exports`).
    pub export_dir: PathBuf,
    /// Export queue polling interval (default: 2s).
    pub poll_interval: Duration,
    /// Reminder scan interval (default: 60s).
    pub reminder_interval: Duration,
}

/// Default export queue polling interval in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
/// Default reminder scan interval in seconds.
const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default            |
    /// |----------------------------|--------------------|
    /// | `EXPORT_DIR`               | `storage/exports`  |
    /// | `EXPORT_POLL_INTERVAL_SECS`| `2`                |
    /// | `REMINDER_INTERVAL_SECS`   | `60`               |
    pub fn from_env() -> Self {
        let export_dir = std::env::var("EXPORT_DIR")
            .unwrap_or_else(|_| "storage/exports".into())
            .into();

        let poll_interval_secs: u64 = std::env::var("EXPORT_POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_SECS.to_string())
            .parse()
            .expect("EXPORT_POLL_INTERVAL_SECS must be a valid u64");

        let reminder_interval_secs: u64 = std::env::var("REMINDER_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_REMINDER_INTERVAL_SECS.to_string())
            .parse()
            .expect("REMINDER_INTERVAL_SECS must be a valid u64");

        Self {
            export_dir,
            poll_interval: Duration::from_secs(poll_interval_secs),
            reminder_interval: Duration::from_secs(reminder_interval_secs),
        }
    }
}
