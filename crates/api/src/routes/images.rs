//! Route definitions for the `/images` resource.
//!
//! ```text
//! POST   /generate    generate_image
//! GET    /            list_images
//! DELETE /{id}        delete_image
//! ```

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(images::generate_image))
        .route("/", get(images::list_images))
        .route("/{id}", delete(images::delete_image))
}
