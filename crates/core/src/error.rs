use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// A reference-range string that matches none of the recognized formats.
///
/// Carries the offending text (after trimming) so callers can surface it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid range format: {text}")]
pub struct RangeParseError {
    pub text: String,
}

impl From<RangeParseError> for CoreError {
    fn from(err: RangeParseError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
