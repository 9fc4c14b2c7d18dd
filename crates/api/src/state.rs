use std::sync::Arc;

use tempo_db::DbPool;
use tempo_reports::ExportQueue;

use crate::config::ServerConfig;

/// Shared application state injected into every handler.
///
/// The export queue sits behind a trait object so tests can swap in a
/// failing backend and exercise the degraded path.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub export_queue: Arc<dyn ExportQueue>,
}
