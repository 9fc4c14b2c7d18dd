//! Background worker: renders queued report exports and dispatches
//! reminders.
//!
//! Runs as a separate process from the API server. Multiple worker
//! instances may run concurrently; job claiming uses `SKIP LOCKED` so a
//! job is only ever processed by one of them at a time.

pub mod config;
pub mod export_worker;
pub mod reminders;
