//! HTTP client for an OpenAI-compatible image-generation gateway.
//!
//! The gateway speaks the chat-completions protocol with an image
//! modality: the prompt goes out as a user message and the image comes
//! back as a URL nested under `choices[0].message.images[0]`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{GatewayError, GeneratedArtifact, ImageGenerator};

/// Default upstream request timeout in seconds. The upstream call has no
/// server-side deadline, so the client must impose one.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default model served by the gateway.
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-image-preview";

/// Configuration for the AI gateway connection.
#[derive(Debug, Clone)]
pub struct AiGatewayConfig {
    /// Base URL of the gateway (e.g. `https://ai.gateway.example.dev`).
    pub base_url: String,
    /// Bearer token for the gateway.
    pub api_key: String,
    /// Model identifier to request.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl AiGatewayConfig {
    /// Load gateway configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default                                  |
    /// |--------------------------|----------|------------------------------------------|
    /// | `AI_GATEWAY_URL`         | **yes**  | --                                       |
    /// | `AI_GATEWAY_API_KEY`     | **yes**  | --                                       |
    /// | `AI_GATEWAY_MODEL`       | no       | `google/gemini-2.5-flash-image-preview`  |
    /// | `AI_GATEWAY_TIMEOUT_SECS`| no       | `60`                                     |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing, which is the desired
    /// fail-fast behaviour at startup.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("AI_GATEWAY_URL").expect("AI_GATEWAY_URL must be set in the environment");
        let api_key = std::env::var("AI_GATEWAY_API_KEY")
            .expect("AI_GATEWAY_API_KEY must be set in the environment");
        let model =
            std::env::var("AI_GATEWAY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs: u64 = std::env::var("AI_GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_GATEWAY_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            model,
            timeout_secs,
        }
    }
}

/// Production [`ImageGenerator`] backed by the AI gateway.
pub struct AiGatewayClient {
    config: AiGatewayConfig,
    http: reqwest::Client,
}

impl AiGatewayClient {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(config: AiGatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Upstream(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ImageGenerator for AiGatewayClient {
    async fn generate(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> Result<GeneratedArtifact, GatewayError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "modalities": ["image", "text"],
            "size": format!("{width}x{height}"),
            "temperature": 0.7,
        });

        tracing::debug!(model = %self.config.model, width, height, "Calling AI gateway");

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Gateway request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "AI gateway error");
            return Err(match status.as_u16() {
                429 => GatewayError::RateLimited,
                402 => GatewayError::PaymentRequired,
                code => GatewayError::Upstream(format!("Gateway returned HTTP {code}")),
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Malformed gateway response: {e}")))?;

        match completion.first_image_url() {
            Some(url) => Ok(GeneratedArtifact {
                image_url: url.to_string(),
            }),
            None => {
                tracing::error!("AI gateway response contained no image payload");
                Err(GatewayError::Upstream(
                    "Gateway response contained no image".to_string(),
                ))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    images: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
struct ImageEntry {
    image_url: ImageUrl,
}

#[derive(Debug, Deserialize)]
struct ImageUrl {
    url: String,
}

impl CompletionResponse {
    /// The image URL at `choices[0].message.images[0].image_url.url`,
    /// if present.
    fn first_image_url(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .images
            .first()
            .map(|entry| entry.image_url.url.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
