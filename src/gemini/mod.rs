// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::{interpret_response, is_json_content_type, GeminiClient};
