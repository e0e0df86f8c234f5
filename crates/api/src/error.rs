use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use artifex_core::error::CoreError;
use artifex_gateway::GatewayError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and folds database failures
/// in via `From`. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `artifex_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<GatewayError> for AppError {
    /// Fold upstream failure classes into the domain taxonomy. The
    /// display strings are what callers see in the `error` field.
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::RateLimited => AppError::Core(CoreError::RateLimited(err.to_string())),
            GatewayError::PaymentRequired => {
                AppError::Core(CoreError::PaymentRequired(err.to_string()))
            }
            GatewayError::Upstream(_) => AppError::Core(CoreError::Upstream(err.to_string())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::QuotaExhausted(msg) => {
                    (StatusCode::FORBIDDEN, "QUOTA_EXHAUSTED", msg.clone())
                }
                CoreError::RateLimited(msg) => {
                    (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", msg.clone())
                }
                CoreError::PaymentRequired(msg) => {
                    (StatusCode::PAYMENT_REQUIRED, "PAYMENT_REQUIRED", msg.clone())
                }
                CoreError::Upstream(msg) => {
                    tracing::error!(error = %msg, "Upstream generation error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPSTREAM_ERROR",
                        "AI service error".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
