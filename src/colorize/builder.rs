// Colorization request builder
// Author: kelexine (https://github.com/kelexine)

use crate::models::gemini::{GenerateContentRequest, GenerationConfig};
use crate::models::ColorizeRequest;
use crate::vision::DataUrl;

/// Instruction sent ahead of every uploaded page.
pub const COLORIZE_PROMPT: &str = "Colorize this black and white manga image. \
Add vibrant, anime-style colors while preserving all the original line art, details, and composition. \
Use appropriate colors for skin tones, hair, clothing, and backgrounds. \
Make it look like a professionally colored manga page. \
Return ONLY the colorized image without any text or explanations.";

/// Fixed sampling parameters for colorization.
pub fn generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.4,
        top_k: 32,
        top_p: 1.0,
        max_output_tokens: 4096,
    }
}

pub fn colorize_request(image: &DataUrl) -> ColorizeRequest {
    ColorizeRequest {
        prompt_text: COLORIZE_PROMPT.to_string(),
        image_mime_type: image.mime_type.clone(),
        image_base64: image.data.clone(),
        generation_config: generation_config(),
    }
}

/// Build the `generateContent` envelope for one page.
pub fn build_request(image: &DataUrl) -> GenerateContentRequest {
    colorize_request(image).into_envelope()
}
