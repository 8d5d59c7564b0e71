//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the upstream API key from leaking into logs or error bodies.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{ProxyError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static KEY_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([?&]key=)[^&\s"']+"#).expect("static regex is valid"));

static GOOGLE_API_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"AIza[0-9A-Za-z_\-]{10,}").expect("static regex is valid"));

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ProxyError::Config(format!("Invalid log level {:?}: {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
    };

    result.map_err(|e| ProxyError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Sanitizes the upstream credential out of a message.
///
/// Replaces the value of any `key=` query parameter and any bare Google API
/// key (`AIza…`) with a `[REDACTED]` placeholder.
pub fn sanitize(input: &str) -> String {
    let result = KEY_PARAM.replace_all(input, "${1}[REDACTED]");
    GOOGLE_API_KEY
        .replace_all(&result, "[REDACTED_API_KEY]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_query_key() {
        let input = "error sending request for url (https://host/v1beta/models/m:generateContent?key=secret123&alt=json)";
        let output = sanitize(input);
        assert!(output.contains("key=[REDACTED]&alt=json"));
        assert!(!output.contains("secret123"));
    }

    #[test]
    fn test_sanitize_bare_api_key() {
        let input = "using AIzaSyA1b2C3d4E5f6G7h8I9j0 for request";
        let output = sanitize(input);
        assert!(output.contains("[REDACTED_API_KEY]"));
        assert!(!output.contains("AIzaSyA1b2C3"));
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize("connection refused"), "connection refused");
    }
}
