// Gemini API relay client
// Author: kelexine (https://github.com/kelexine)

use crate::config::{ApiKey, GeminiConfig};
use crate::error::{excerpt, ProxyError, Result};
use crate::utils::logging::sanitize;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::IgnoredAny;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Client for the public Gemini `generateContent` endpoint.
///
/// Sends each request exactly once. Retrying is left to the caller.
/// Holds no credential; the key is passed in per call.
pub struct GeminiClient {
    http_client: Client,
    api_base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Both a total and a connect timeout are applied so a hung upstream
    /// cannot hold a request open forever.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created upstream HTTP client (timeout {}s)", config.timeout_seconds);

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Target model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` URL, without the key.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url, self.model
        )
    }

    /// Forward `body` to `generateContent` and return the reply text exactly
    /// as received, once it is known to be JSON.
    ///
    /// Errors:
    /// - `Transport` when the call does not complete
    /// - `UnexpectedFormat` when the reply is empty or not JSON-typed
    /// - `InvalidJson` when a JSON-typed reply does not parse
    /// - `Upstream` when the reply is JSON with a non-success status
    pub async fn generate_content(&self, api_key: &ApiKey, body: &Value) -> Result<String> {
        let url = self.endpoint();
        info!("Calling generateContent for model: {}", self.model);

        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key.expose())])
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let message = sanitize(&e.without_url().to_string());
                error!("Upstream request failed: {}", message);
                ProxyError::Transport(message)
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let text = response.text().await.map_err(|e| {
            let message = sanitize(&e.without_url().to_string());
            error!("Failed to read upstream body: {}", message);
            ProxyError::Transport(message)
        })?;

        let elapsed = start.elapsed();
        crate::metrics::record_upstream_call(&self.model, status, elapsed.as_secs_f64());
        info!(
            "Upstream replied HTTP {} ({}, {} bytes) in {:?}",
            status,
            if content_type.is_empty() { "no content-type" } else { content_type.as_str() },
            text.len(),
            elapsed
        );
        debug!("Upstream body (first 200 chars): {}", excerpt(&text));

        interpret_response(status, &content_type, text)
    }
}

/// Turn a raw upstream reply into the relayed body or a relay error.
///
/// JSON parsing is never attempted on an empty body or a non-JSON content type.
/// The body is only checked for well-formedness; the text handed back is the
/// upstream's own, byte for byte.
pub fn interpret_response(status: u16, content_type: &str, text: String) -> Result<String> {
    if text.trim().is_empty() || !is_json_content_type(content_type) {
        warn!(
            "Unexpected upstream response format: HTTP {}, content-type {:?}",
            status, content_type
        );
        let body = if text.is_empty() { "<empty>".to_string() } else { excerpt(&text) };
        let content_type = if content_type.is_empty() { "<none>" } else { content_type };
        return Err(ProxyError::UnexpectedFormat {
            message: "Unexpected response format from API".to_string(),
            details: format!(
                "HTTP {}, content-type {}, body: {}",
                status, content_type, body
            ),
        });
    }

    if let Err(e) = serde_json::from_str::<IgnoredAny>(&text) {
        error!("Failed to parse upstream JSON: {}", e);
        return Err(ProxyError::InvalidJson {
            details: excerpt(&text),
        });
    }

    if !(200..300).contains(&status) {
        error!("Gemini API error: HTTP {}", status);
        return Err(ProxyError::Upstream { status, body: text });
    }

    Ok(text)
}

/// `application/json` or any `application/*+json`, ignoring parameters.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
