//! Client side of the colorizer.
//!
//! Builds the `generateContent` envelope for an uploaded page, sends it to
//! the relay, and turns the reply into an image or a readable error.
//!
//! # Submodules
//!
//! - `builder`: The fixed instruction and generation settings.
//! - `client`: HTTP client for `/api/colorize` and reply interpretation.
//! - `session`: Upload/result state for one session.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod builder;
pub mod client;
pub mod session;

pub use builder::{build_request, colorize_request, COLORIZE_PROMPT};
pub use client::{interpret_reply, ColorizerClient};
pub use session::UiState;
