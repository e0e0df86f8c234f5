//! Handlers for the `/images` resource.
//!
//! Routes:
//! - `POST   /images/generate` — quota-gated generation (the broker)
//! - `GET    /images`          — the caller's gallery, newest first
//! - `DELETE /images/{id}`     — idempotent delete of an own image

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use artifex_core::types::DbId;
use artifex_db::models::generated_image::GeneratedImage;
use artifex_db::repositories::GeneratedImageRepo;

use crate::broker::{self, GenerateRequest, GenerateResponse};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/images/generate
///
/// Runs the full broker flow: refill reconciliation, balance gate,
/// upstream call, persistence, debit. Returns the flat
/// `{ imageUrl, creditsRemaining }` contract object.
pub async fn generate_image(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let response = broker::generate(&state, user.user_id, input).await?;
    Ok(Json(response))
}

/// GET /api/v1/images
///
/// List the caller's generated images, newest first.
pub async fn list_images(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<GeneratedImage>>>> {
    let images = GeneratedImageRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// DELETE /api/v1/images/{id}
///
/// Delete one of the caller's images. Idempotent: deleting an id that
/// does not exist (or belongs to someone else) still returns 204.
pub async fn delete_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GeneratedImageRepo::delete_by_id(&state.pool, user.user_id, id).await?;
    if !deleted {
        tracing::debug!(user_id = user.user_id, image_id = id, "Delete matched no row");
    }
    Ok(StatusCode::NO_CONTENT)
}
