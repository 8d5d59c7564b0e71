// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{json_text_response, ProxyError, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{error, info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Requests fail fast without a key, so report it
    let key_check = if state.api_key.is_some() {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "error".to_string(),
            message: "API key not configured".to_string(),
        }
    };
    checks.insert("api_key".to_string(), key_check);

    checks.insert(
        "model".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: state.gemini_client.model().to_string(),
        },
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for `POST /api/colorize`.
///
/// Relays the request envelope to Gemini and returns its JSON reply
/// untouched; every failure becomes a JSON error body.
pub async fn colorize_handler(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let outcome = match body {
        Ok(body) => {
            info!("Colorization request received ({} bytes)", body.len());
            relay(&state, &body).await
        }
        Err(rejection) => Err(ProxyError::Rejected {
            status: rejection.status().as_u16(),
            message: rejection.body_text(),
        }),
    };
    match &outcome {
        Ok(_) => crate::metrics::record_relay_outcome("success"),
        Err(e) => {
            warn!("Colorization request failed ({}): {}", e.kind(), e);
            crate::metrics::record_relay_outcome(e.kind());
        }
    }

    outcome.map(|text| json_text_response(StatusCode::OK, text))
}

async fn relay(state: &AppState, body: &[u8]) -> Result<String> {
    // Checked before anything else so a missing key never reaches the network
    let api_key = state.api_key.as_deref().ok_or_else(|| {
        error!("API key not configured");
        ProxyError::ApiKeyMissing
    })?;

    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ProxyError::InvalidRequest(format!("Request body is not valid JSON: {}", e)))?;

    state.gemini_client.generate_content(api_key, &payload).await
}

pub async fn metrics_handler() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
        .into_response()
}

/// Any method other than POST on `/api/colorize`.
pub async fn colorize_method_not_allowed() -> Response {
    let error = ProxyError::Rejected {
        status: StatusCode::METHOD_NOT_ALLOWED.as_u16(),
        message: "Method not allowed; use POST".to_string(),
    };
    ([(header::ALLOW, "POST")], error).into_response()
}

/// Unknown `/api/*` routes get a JSON 404 instead of the SPA.
pub async fn api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "route not found" })),
    )
        .into_response()
}
