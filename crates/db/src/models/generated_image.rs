//! Generated image entity model and DTOs.

use artifex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `generated_images` table.
///
/// Append-only: rows are inserted by the broker after a successful
/// upstream generation and never updated afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneratedImage {
    pub id: DbId,
    pub user_id: DbId,
    pub prompt: String,
    pub aspect_ratio: String,
    pub quality: Option<String>,
    pub image_url: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new generated image.
#[derive(Debug, Clone)]
pub struct NewGeneratedImage {
    pub user_id: DbId,
    pub prompt: String,
    pub aspect_ratio: String,
    /// Opaque quality label, passed through from the request unchanged.
    pub quality: Option<String>,
    pub image_url: String,
}
