//! Route definitions for the `/beer` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::beer;
use crate::state::AppState;

/// Routes mounted at `/beer`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> patch
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(beer::list).post(beer::create))
        .route(
            "/{id}",
            get(beer::get_by_id)
                .put(beer::update)
                .patch(beer::patch)
                .delete(beer::delete),
        )
}
