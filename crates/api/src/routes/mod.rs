pub mod auth;
pub mod health;
pub mod integrations;
pub mod projects;
pub mod reminders;
pub mod reports;
pub mod time_entries;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/refresh                  refresh (public)
/// /auth/logout                   logout (requires auth)
/// /auth/me                       current user profile
///
/// /projects                      list, create
/// /projects/{id}                 get, update, archive (DELETE)
///
/// /time-entries                  list (?project_ids, started_after, started_before), create
/// /time-entries/{id}             get, update, delete
///
/// /reports/summary               per-project aggregation (POST)
/// /reports/export                request async export (POST, 202)
/// /reports/exports               export history (GET)
/// /reports/exports/{id}          export status (GET)
///
/// /reminders                     list, create
/// /reminders/{id}                update, delete
///
/// /integrations                  list (GET)
/// /integrations/{provider}       connect/replace (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", projects::router())
        .nest("/time-entries", time_entries::router())
        .nest("/reports", reports::router())
        .nest("/reminders", reminders::router())
        .nest("/integrations", integrations::router())
}
