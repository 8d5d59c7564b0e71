//! Wire and domain types.
//!
//! - `gemini`: the `generateContent` request envelope.
//! - `colorize`: the per-action request and the extracted result image.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod colorize;
pub mod gemini;

pub use colorize::{ColorizeRequest, ExtractedImage};
