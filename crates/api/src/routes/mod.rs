pub mod drugs;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /drugs                 list, create (GET, POST)
/// /drugs/search          name-prefix search (GET, ?drug=)
/// /drugs/evaluate        classify an observed level (POST)
/// /drugs/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/drugs", drugs::router())
}
