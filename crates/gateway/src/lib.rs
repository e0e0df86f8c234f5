//! Client for the external image-generation service.
//!
//! [`ImageGenerator`] is the seam the API broker calls through; the
//! production implementation is [`client::AiGatewayClient`], and tests
//! substitute a scripted mock.

pub mod client;

use async_trait::async_trait;

pub use client::{AiGatewayClient, AiGatewayConfig};

/// A successfully generated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// URL (or data URL) of the generated image.
    pub image_url: String,
}

/// Failure classes for an upstream generation call.
///
/// None of these ever debits the ledger or persists an artifact; the
/// broker surfaces them to the caller as a single terminal failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Upstream returned HTTP 429.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Upstream returned HTTP 402.
    #[error("Payment required. Please add credits to your workspace.")]
    PaymentRequired,

    /// Any other failure: non-2xx status, transport error, timeout, or a
    /// 2xx response with no image payload.
    #[error("AI service error: {0}")]
    Upstream(String),
}

/// Generates an image for a prompt at the given pixel dimensions.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> Result<GeneratedArtifact, GatewayError>;
}
