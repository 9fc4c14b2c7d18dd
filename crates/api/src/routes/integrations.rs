//! Route definitions for the `/integrations` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::integrations;
use crate::state::AppState;

/// Routes mounted at `/integrations`.
///
/// ```text
/// GET /             -> list
/// PUT /{provider}   -> upsert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(integrations::list))
        .route("/{provider}", put(integrations::upsert))
}
