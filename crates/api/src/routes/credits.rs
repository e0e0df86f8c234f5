//! Route definitions for the `/credits` read model.

use axum::routing::get;
use axum::Router;

use crate::handlers::credits;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(credits::get_credits))
}
