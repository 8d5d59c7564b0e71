// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    api_not_found, colorize_handler, colorize_method_not_allowed, health_handler, metrics_handler,
};
use super::middleware::{cors_layer, request_id_layers, spa_service, trace_layer};
use crate::config::{ApiKey, AppConfig};
use crate::error::Result;
use crate::gemini::GeminiClient;
use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    /// Configuration with the credential already moved out.
    pub config: AppConfig,
    pub gemini_client: Arc<GeminiClient>,
    /// Read once from configuration when the router is built.
    pub api_key: Option<Arc<ApiKey>>,
}

impl AppState {
    pub fn new(mut config: AppConfig, gemini_client: GeminiClient) -> Self {
        let api_key = config.gemini.take_api_key().map(Arc::new);
        if api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; /api/colorize will answer 500 until it is configured");
        }

        Self {
            config,
            gemini_client: Arc::new(gemini_client),
            api_key,
        }
    }
}

pub fn create_router(config: AppConfig, gemini_client: GeminiClient) -> Result<Router> {
    let body_limit = config.performance.max_body_bytes;
    let enable_compression = config.performance.enable_compression;
    let static_dir = config.server.static_dir.clone();

    let state = AppState::new(config, gemini_client);

    let (set_request_id, propagate_request_id) = request_id_layers();

    let mut app = Router::new()
        .route(
            "/api/colorize",
            post(colorize_handler).fallback(colorize_method_not_allowed),
        )
        .route("/api/*rest", any(api_not_found))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // Everything else is the single-page app
        .fallback_service(spa_service(&static_dir))
        // Base64 pages are large: 7MB PNG = ~9.5MB base64
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer());

    if enable_compression {
        app = app.layer(CompressionLayer::new());
    }

    let app = app
        .layer(trace_layer())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_holds_only_the_zeroizing_key() {
        let mut config = AppConfig::default();
        config.gemini.api_key = Some("AIzaSecretValue".to_string());
        let client = GeminiClient::new(&config.gemini).unwrap();

        let state = AppState::new(config, client);
        assert!(state.config.gemini.api_key.is_none());
        assert_eq!(state.api_key.as_deref().unwrap().expose(), "AIzaSecretValue");
    }
}
