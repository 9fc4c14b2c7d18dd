//! Route definitions for the `/reminders` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::reminders;
use crate::state::AppState;

/// Routes mounted at `/reminders`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reminders::list).post(reminders::create))
        .route(
            "/{id}",
            patch(reminders::update).delete(reminders::delete),
        )
}
