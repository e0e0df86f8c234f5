//! Repository for the `generated_images` table.

use sqlx::PgPool;

use artifex_core::types::DbId;

use crate::models::generated_image::{GeneratedImage, NewGeneratedImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, prompt, aspect_ratio, quality, image_url, created_at";

/// Provides append/list/delete operations for generated images.
pub struct GeneratedImageRepo;

impl GeneratedImageRepo {
    /// Insert a new generated image, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        input: &NewGeneratedImage,
    ) -> Result<GeneratedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_images (user_id, prompt, aspect_ratio, quality, image_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(input.user_id)
            .bind(&input.prompt)
            .bind(&input.aspect_ratio)
            .bind(&input.quality)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// List a user's images, newest first.
    ///
    /// `id DESC` breaks ties between rows created in the same instant.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<GeneratedImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_images
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete one of a user's images by id.
    ///
    /// Scoped to the owning user so a caller cannot delete another
    /// user's rows. Idempotent: a missing id returns `false`, not an
    /// error.
    pub async fn delete_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM generated_images WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
