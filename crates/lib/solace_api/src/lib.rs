//! # solace_api
//!
//! HTTP API library for Solace.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use solace_core::completion::{CompletionError, CompletionProvider};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health};

/// Path of the relay endpoint.
pub const CHAT_ROUTE: &str = "/api/chat";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Upstream completion client.
    pub provider: Arc<dyn CompletionProvider>,
}

impl AppState {
    /// Builds state with the HTTP provider described by `config`.
    pub fn from_config(config: ApiConfig) -> Result<Self, CompletionError> {
        let provider = Arc::new(config.completion_provider()?);
        Ok(Self { config, provider })
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::liveness))
        .route(CHAT_ROUTE, post(chat::chat_handler))
        .layer(cors)
        .with_state(state)
}
