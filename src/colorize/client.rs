// Client for the relay's /api/colorize endpoint
// Author: kelexine (https://github.com/kelexine)

use super::builder::build_request;
use super::session::UiState;
use crate::error::{excerpt, ProxyError, Result};
use crate::extraction::locate_image;
use crate::gemini::is_json_content_type;
use crate::models::ExtractedImage;
use crate::vision::DataUrl;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

/// Sends pages to a running relay and pulls the image out of its reply.
pub struct ColorizerClient {
    http_client: Client,
    endpoint: String,
}

impl ColorizerClient {
    /// `server` is the relay's base URL, e.g. `http://127.0.0.1:8082`.
    pub fn new(server: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .use_rustls_tls()
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: format!("{}/api/colorize", server.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Colorize one page.
    pub async fn colorize(&self, image: &DataUrl) -> Result<ExtractedImage> {
        let request = build_request(image);
        info!("Sending colorization request to {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = response
            .text()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        interpret_reply(status, &content_type, &text)
    }

    /// Run one request through `state`, leaving it idle whatever happens.
    pub async fn colorize_session(&self, state: &mut UiState) -> Result<ExtractedImage> {
        let image = state.begin()?;
        match self.colorize(&image).await {
            Ok(result) => {
                state.complete(&result);
                Ok(result)
            }
            Err(e) => {
                state.fail();
                Err(e)
            }
        }
    }
}

/// Interpret the relay's reply: surface its error, or extract the image.
pub fn interpret_reply(status: u16, content_type: &str, text: &str) -> Result<ExtractedImage> {
    let is_json = is_json_content_type(content_type);

    if !(200..300).contains(&status) {
        let fallback = || ProxyError::Server {
            status,
            message: format!(
                "API error ({}): {}",
                status,
                if text.is_empty() { "Empty response".to_string() } else { excerpt(text) }
            ),
        };
        if text.is_empty() || !is_json {
            return Err(fallback());
        }
        let body: Value = serde_json::from_str(text).map_err(|_| fallback())?;
        error!("Relay error response: HTTP {}", status);
        return Err(ProxyError::Server {
            status,
            message: error_message(&body),
        });
    }

    if text.is_empty() {
        return Err(ProxyError::Server {
            status,
            message: "Empty response from server".to_string(),
        });
    }
    if !is_json {
        error!("Unexpected content type: {:?}", content_type);
        return Err(ProxyError::Server {
            status,
            message: "Server returned non-JSON response".to_string(),
        });
    }

    let body: Value = serde_json::from_str(text).map_err(|e| {
        error!("Failed to parse JSON response: {}", e);
        ProxyError::Server {
            status,
            message: "Invalid JSON response from server".to_string(),
        }
    })?;

    let located = locate_image(&body);
    crate::metrics::record_extraction(located.as_ref().map(|(shape, _)| *shape));

    match located {
        Some((shape, image)) => {
            debug!("Found {} image via {}", image.mime_type, shape);
            Ok(image)
        }
        None => {
            error!("No inline image in response: {}", excerpt(text));
            Err(ProxyError::NoImageData)
        }
    }
}

/// The relay's `error` string, an upstream `error.message`, or a fallback.
fn error_message(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        Some(Value::Object(detail)) => detail
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("Failed to colorize image")
            .to_string(),
        _ => "Failed to colorize image".to_string(),
    }
}
