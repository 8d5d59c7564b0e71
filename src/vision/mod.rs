//! Image upload handling for the colorize client.
//!
//! This module validates user uploads before any network call and converts
//! between raw bytes, base64 payloads and `data:` URLs.
//!
//! # Submodules
//!
//! - `models`: Image formats, magic-byte detection and size limits.
//! - `data_url`: `data:` URL parsing/encoding and upload validation.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod data_url;
pub mod models;

pub use data_url::{image_to_base64, mime_type_of, validate_upload, DataUrl};
pub use models::ImageFormat;
