//! Drug search and evaluation input rules.

use crate::error::CoreError;

/// Entity name used in `CoreError::NotFound`.
pub const ENTITY_DRUG: &str = "Drug";

/// Trim a user-supplied name query. Blank input yields `None`.
pub fn normalize_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Build a case-insensitive `LIKE` prefix pattern for a name query.
///
/// `%` and `_` in the query are passed through so callers can use them as
/// wildcards.
pub fn prefix_pattern(query: &str) -> String {
    format!("{}%", query.to_lowercase())
}

/// Reject observed levels that cannot be compared against a range.
pub fn validate_observed_level(level: f64) -> Result<(), CoreError> {
    if !level.is_finite() {
        return Err(CoreError::Validation(format!(
            "Observed level must be a finite number, got {level}"
        )));
    }
    Ok(())
}
