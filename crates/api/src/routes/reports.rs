//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// POST /summary        -> summary ({project_ids?, date_from, date_to})
/// POST /export         -> request_export (202 Accepted)
/// GET  /exports        -> list_exports
/// GET  /exports/{id}   -> get_export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", post(reports::summary))
        .route("/export", post(reports::request_export))
        .route("/exports", get(reports::list_exports))
        .route("/exports/{id}", get(reports::get_export))
}
