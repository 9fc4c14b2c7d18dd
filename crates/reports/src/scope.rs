//! Project scope validation for report requests.

use sqlx::PgPool;
use tempo_core::error::CoreError;
use tempo_core::types::DbId;
use tempo_db::repositories::ProjectRepo;

use crate::error::ReportError;

/// Verify that every id in `project_ids` names a project owned by
/// `user_id`.
///
/// All-or-nothing: one bad id rejects the whole request. An id that
/// matches no project at all yields `NotFound`; an id that matches a
/// project owned by someone else yields `Forbidden`. Missing ids are
/// reported before foreign ones so the caller never learns whether a
/// probe of someone else's id space hit a real project. An empty slice
/// is trivially valid.
pub async fn validate_project_scope(
    pool: &PgPool,
    user_id: DbId,
    project_ids: &[DbId],
) -> Result<(), ReportError> {
    if project_ids.is_empty() {
        return Ok(());
    }

    let projects = ProjectRepo::find_by_ids(pool, project_ids).await?;

    for &id in project_ids {
        if !projects.iter().any(|p| p.id == id) {
            return Err(CoreError::NotFound {
                entity: "project",
                id,
            }
            .into());
        }
    }

    for project in &projects {
        if project.owner_id != user_id {
            return Err(CoreError::Forbidden(format!(
                "project {} does not belong to the requesting user",
                project.id
            ))
            .into());
        }
    }

    Ok(())
}
