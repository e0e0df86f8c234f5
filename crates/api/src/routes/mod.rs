pub mod credits;
pub mod health;
pub mod images;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /images/generate      POST    quota-gated generation
/// /images               GET     caller's gallery, newest first
/// /images/{id}          DELETE  idempotent delete
/// /credits              GET     balance read model
/// ```
///
/// All routes require a Bearer token; the health check lives at the
/// root level, outside this tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/images", images::router())
        .nest("/credits", credits::router())
}
