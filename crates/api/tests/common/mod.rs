//! Shared harness for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`)
//! against a `#[sqlx::test]` pool, with a scripted [`MockGenerator`]
//! standing in for the external image-generation service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use artifex_api::auth::jwt::{generate_access_token, JwtConfig};
use artifex_api::config::ServerConfig;
use artifex_api::router::build_app_router;
use artifex_api::state::AppState;
use artifex_gateway::{GatewayError, GeneratedArtifact, ImageGenerator};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-with-plenty-of-entropy";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

// ---------------------------------------------------------------------------
// Mock generator
// ---------------------------------------------------------------------------

/// What the next `generate` call should do.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Success(String),
    RateLimited,
    PaymentRequired,
    Upstream,
}

/// Scripted [`ImageGenerator`] that records how often it was called.
pub struct MockGenerator {
    outcome: MockOutcome,
    calls: AtomicUsize,
}

impl MockGenerator {
    pub fn new(outcome: MockOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    /// Shorthand for a generator that always returns `url`.
    pub fn succeeding(url: &str) -> Arc<Self> {
        Self::new(MockOutcome::Success(url.to_string()))
    }

    /// Number of times `generate` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for MockGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _width: u32,
        _height: u32,
    ) -> Result<GeneratedArtifact, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            MockOutcome::Success(url) => Ok(GeneratedArtifact {
                image_url: url.clone(),
            }),
            MockOutcome::RateLimited => Err(GatewayError::RateLimited),
            MockOutcome::PaymentRequired => Err(GatewayError::PaymentRequired),
            MockOutcome::Upstream => Err(GatewayError::Upstream("boom".to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, using
/// the given database pool and generator.
pub fn build_test_app(pool: PgPool, generator: Arc<dyn ImageGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
    };
    build_app_router(state, &config)
}

/// Mint a valid access token for `user_id` with the test secret.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a response is a JSON error with the given status.
pub async fn assert_error(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert!(json["error"].is_string(), "error body must have a message");
    json
}
