pub mod auth;
pub mod beer;
pub mod customer;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login           issue a token (public)
///
/// /beer                 list, create
/// /beer/{id}            get, replace, patch, delete
///
/// /customer             list, create
/// /customer/{id}        get, replace, patch, delete
/// ```
///
/// Every route except `/auth/login` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/beer", beer::router())
        .nest("/customer", customer::router())
}
