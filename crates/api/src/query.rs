//! Shared query-string parsing helpers.

use tempo_core::types::DbId;

use crate::error::AppError;

/// Parse a comma-separated id list (`?project_ids=1,2,3`) into ids.
///
/// Axum's `Query` extractor cannot deserialize repeated parameters into a
/// `Vec`, so list-valued filters travel as a single comma-separated string.
/// Empty segments are ignored (`"1,,2"` parses as `[1, 2]`); a segment that
/// is not an integer is a 400.
pub fn parse_id_csv(raw: &str) -> Result<Vec<DbId>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid id in list: '{s}'")))
        })
        .collect()
}
