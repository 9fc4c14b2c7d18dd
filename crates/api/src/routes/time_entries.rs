//! Route definitions for the `/time-entries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::time_entries;
use crate::state::AppState;

/// Routes mounted at `/time-entries`.
///
/// ```text
/// GET    /       -> list (?project_ids=1,2&started_after=..&started_before=..)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(time_entries::list).post(time_entries::create))
        .route(
            "/{id}",
            get(time_entries::get_by_id)
                .patch(time_entries::update)
                .delete(time_entries::delete),
        )
}
