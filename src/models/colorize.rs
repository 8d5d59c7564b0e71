// Colorization domain types
// Author: kelexine (https://github.com/kelexine)

use super::gemini::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
use crate::error::{ProxyError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One colorization request, built per user action and consumed by the call.
#[derive(Debug, Clone)]
pub struct ColorizeRequest {
    pub prompt_text: String,
    pub image_mime_type: String,
    pub image_base64: String,
    pub generation_config: GenerationConfig,
}

impl ColorizeRequest {
    /// Lay out the request envelope: instruction part first, image second.
    pub fn into_envelope(self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: self.prompt_text,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: self.image_mime_type,
                            data: self.image_base64,
                        },
                    },
                ],
            }],
            generation_config: Some(self.generation_config),
        }
    }
}

/// Image located inside an upstream response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedImage {
    pub mime_type: String,
    pub base64_data: String,
}

impl ExtractedImage {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }

    /// Decode the base64 payload into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.base64_data.trim())
            .map_err(|e| ProxyError::Internal(format!("Invalid base64 image data: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        let image = ExtractedImage {
            mime_type: "image/png".to_string(),
            base64_data: "iVBORw0KGgo=".to_string(),
        };
        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let image = ExtractedImage {
            mime_type: "image/png".to_string(),
            base64_data: "not base64!!".to_string(),
        };
        assert!(image.decode().is_err());
    }
}
