use std::sync::Arc;

use artifex_gateway::ImageGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: artifex_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// External image-generation service. Trait object so tests can
    /// substitute a scripted mock for the real gateway client.
    pub generator: Arc<dyn ImageGenerator>,
}
