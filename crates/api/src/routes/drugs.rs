//! Route definitions for the `/drugs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::drugs;
use crate::state::AppState;

/// Routes mounted at `/drugs`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /search      -> search   (?drug=prefix)
/// POST   /evaluate    -> evaluate
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(drugs::list).post(drugs::create))
        .route("/search", get(drugs::search))
        .route("/evaluate", post(drugs::evaluate))
        .route(
            "/{id}",
            get(drugs::get_by_id)
                .put(drugs::update)
                .delete(drugs::delete),
        )
}
