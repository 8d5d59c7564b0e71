// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use manga_colorizer::error::ProxyError;
use serde_json::{json, Value};

async fn body_of(error: ProxyError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        ProxyError::ApiKeyMissing,
        ProxyError::Transport("connection refused".to_string()),
        ProxyError::InvalidJson { details: "{".to_string() },
        ProxyError::NoImageData,
        ProxyError::NotAnImage("text/plain".to_string()),
        ProxyError::InvalidRequest("Bad request".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_fixed_messages() {
    assert_eq!(ProxyError::ApiKeyMissing.to_string(), "API key not configured");
    assert_eq!(ProxyError::NoImageData.to_string(), "No image data in response");
    assert_eq!(
        ProxyError::Transport("dns error".to_string()).to_string(),
        "Failed to colorize manga: dns error"
    );
}

#[test]
fn test_extraction_failure_is_distinct_from_parse_failure() {
    assert_ne!(ProxyError::NoImageData.kind(), ProxyError::InvalidJson { details: String::new() }.kind());
    assert_ne!(ProxyError::NoImageData.kind(), ProxyError::Transport(String::new()).kind());
}

#[tokio::test]
async fn test_missing_key_body() {
    let (status, body) = body_of(ProxyError::ApiKeyMissing).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "API key not configured" }));
}

#[tokio::test]
async fn test_unexpected_format_body_has_details() {
    let (status, body) = body_of(ProxyError::UnexpectedFormat {
        message: "Unexpected response format from API".to_string(),
        details: "HTTP 200, content-type text/html, body: <empty>".to_string(),
    })
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Unexpected response format from API");
    assert_eq!(body["details"], "HTTP 200, content-type text/html, body: <empty>");
}

#[tokio::test]
async fn test_upstream_body_is_verbatim() {
    let upstream = r#"{"error":{"status":"PERMISSION_DENIED","message":"API key not valid.","code":403}}"#;
    let response = ProxyError::Upstream {
        status: 403,
        body: upstream.to_string(),
    }
    .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.headers()["content-type"], "application/json");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], upstream.as_bytes());
}

#[tokio::test]
async fn test_rejected_keeps_status() {
    let (status, body) = body_of(ProxyError::Rejected {
        status: 413,
        message: "Request body too large".to_string(),
    })
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({ "error": "Request body too large" }));
}

#[tokio::test]
async fn test_not_an_image_is_bad_request() {
    let (status, body) = body_of(ProxyError::NotAnImage("text/plain".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("text/plain"));
}
