use tempo_core::error::CoreError;

/// Errors surfaced by the reporting subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A render backend (CSV or PDF) failed to produce an artifact.
    #[error("render failed: {0}")]
    Render(String),
}
