// Error types for the manga colorizer relay
// Author: kelexine (https://github.com/kelexine)

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Longest raw-body excerpt carried in an error message.
pub const EXCERPT_LIMIT: usize = 200;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API key not configured")]
    ApiKeyMissing,

    #[error("Failed to colorize manga: {0}")]
    Transport(String),

    #[error("{message}")]
    UnexpectedFormat { message: String, details: String },

    #[error("Invalid JSON response from API")]
    InvalidJson { details: String },

    /// Upstream answered with a non-success status. `body` is its JSON text,
    /// relayed byte for byte.
    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("No image data in response")]
    NoImageData,

    #[error("Not an image: {0}")]
    NotAnImage(String),

    /// Relay answered the colorize client with an error.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The inbound request was refused before reaching a handler body
    /// (oversized payload, wrong method).
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Short label used for logs and the outcome metric.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::ApiKeyMissing | ProxyError::Config(_) | ProxyError::ConfigParsing(_) => {
                "configuration"
            }
            ProxyError::Transport(_) | ProxyError::Http(_) => "transport",
            ProxyError::UnexpectedFormat { .. } | ProxyError::InvalidJson { .. } => {
                "malformed_response"
            }
            ProxyError::Upstream { .. } => "upstream_rejected",
            ProxyError::NoImageData => "no_image",
            ProxyError::NotAnImage(_)
            | ProxyError::InvalidRequest(_)
            | ProxyError::Rejected { .. } => "invalid_request",
            ProxyError::Server { .. } => "server",
            ProxyError::Io(_) | ProxyError::Json(_) | ProxyError::Internal(_) => "internal",
        }
    }
}

/// First `EXCERPT_LIMIT` characters of `text`, on a char boundary.
pub fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LIMIT).collect()
}

// Convert ProxyError to HTTP responses for Axum
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::Upstream { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                return json_text_response(status, body);
            }
            ProxyError::UnexpectedFormat { ref details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string(), "details": details }),
            ),
            ProxyError::InvalidJson { ref details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string(), "details": details }),
            ),
            ProxyError::InvalidRequest(_) | ProxyError::NotAnImage(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ProxyError::NoImageData => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.to_string() }),
            ),
            ProxyError::Server { status, ref message }
            | ProxyError::Rejected { status, ref message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({ "error": message }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Response carrying already-serialized JSON text unchanged.
pub fn json_text_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub type Result<T> = std::result::Result<T, ProxyError>;
