//! Axum-based HTTP server for the manga colorizer.
//!
//! Serves the relay endpoint that forwards colorization requests to the
//! Gemini API with the server-held key, plus health, metrics, and the bundled
//! single-page application.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations (colorize, health, metrics).
//! - `middleware`: Request IDs, tracing spans, CORS, and static file serving.
//! - `routes`: The router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus};
pub use routes::{create_router, AppState};
