//! Query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /drugs/search` (`?drug=`).
///
/// A missing parameter is treated the same as a blank one.
#[derive(Debug, Deserialize)]
pub struct DrugSearchParams {
    #[serde(default)]
    pub drug: String,
}
