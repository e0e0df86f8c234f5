/// Domain-level error taxonomy for the generation broker.
///
/// Each variant maps to exactly one HTTP status at the API boundary
/// (see `artifex-api`'s `AppError`): Validation → 400, Unauthorized →
/// 401, QuotaExhausted → 403, RateLimited → 429, PaymentRequired →
/// 402, Upstream → 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller has no generation credits left for the current window.
    #[error("{0}")]
    QuotaExhausted(String),

    /// The upstream generation service returned HTTP 429.
    #[error("{0}")]
    RateLimited(String),

    /// The upstream generation service returned HTTP 402.
    #[error("{0}")]
    PaymentRequired(String),

    /// Any other upstream failure, including a 2xx with no image payload.
    #[error("{0}")]
    Upstream(String),
}
