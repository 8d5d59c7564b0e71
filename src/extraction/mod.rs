//! Locating the generated image inside a `generateContent` response.
//!
//! The response schema is not stable across model versions: keys come in
//! camelCase or snake_case, and the inline image has been seen at several
//! depths. Each observed location is an [`EnvelopeShape`]; lookup walks them
//! in a fixed priority order and stops at the first match.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod shapes;

pub use shapes::{extract_image, locate_image, EnvelopeShape, DEFAULT_MIME_TYPE};
