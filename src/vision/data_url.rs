// Data URL handling and upload validation
// Author: kelexine (https://github.com/kelexine)

use super::models::{validate_image_size, ImageFormat};
use crate::error::{ProxyError, Result};
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Media type assumed for uploads whose data URL declares none.
pub const DEFAULT_UPLOAD_MIME_TYPE: &str = "image/jpeg";

static MIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"data:([^;]+);").expect("static regex is valid"));

/// A base64 `data:` URL split into its media type and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub data: String,
}

impl DataUrl {
    /// Encode raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Parse `data:<mime>;base64,<payload>`. A bare base64 string is accepted
    /// and gets the default upload media type.
    pub fn parse(input: &str) -> Result<Self> {
        let data = image_to_base64(input);
        if data.is_empty() {
            return Err(ProxyError::InvalidRequest("Empty image data".to_string()));
        }
        Ok(Self {
            mime_type: mime_type_of(input).to_string(),
            data: data.to_string(),
        })
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The base64 payload of an image reference: everything after the first comma
/// of a data URL, or the input itself when it is already bare base64.
pub fn image_to_base64(image: &str) -> &str {
    if image.starts_with("data:") {
        return image.split_once(',').map(|(_, data)| data).unwrap_or("");
    }
    image
        .split_once("base64,")
        .map(|(_, data)| data)
        .unwrap_or(image)
}

/// The media type declared by a data URL, `image/jpeg` when absent.
pub fn mime_type_of(image: &str) -> &str {
    MIME_PATTERN
        .captures(image)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_UPLOAD_MIME_TYPE)
}

/// Check an upload before anything is sent.
///
/// The media type comes from the file's magic bytes when recognised, else from
/// `declared_mime`. Anything outside `image/*` is rejected. Returns the media
/// type to send.
pub fn validate_upload(bytes: &[u8], declared_mime: Option<&str>) -> Result<String> {
    let mime = ImageFormat::detect(bytes)
        .map(|format| format.mime_type().to_string())
        .or_else(|| declared_mime.map(|m| m.trim().to_lowercase()))
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ProxyError::NotAnImage("unrecognised file type".to_string()))?;

    if !mime.starts_with("image/") {
        return Err(ProxyError::NotAnImage(format!(
            "{} is not an image type, please upload an image file",
            mime
        )));
    }

    validate_image_size(bytes.len()).map_err(ProxyError::InvalidRequest)?;
    Ok(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tiny 1x1 PNG (base64 encoded)
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn test_image_to_base64_strips_prefix() {
        let url = format!("data:image/png;base64,{}", PNG_1X1);
        assert_eq!(image_to_base64(&url), PNG_1X1);
        assert_eq!(image_to_base64(PNG_1X1), PNG_1X1);
    }

    #[test]
    fn test_mime_type_of() {
        assert_eq!(mime_type_of("data:image/webp;base64,AAAA"), "image/webp");
        assert_eq!(mime_type_of("AAAA"), "image/jpeg");
    }

    #[test]
    fn test_parse_and_display() {
        let url = format!("data:image/png;base64,{}", PNG_1X1);
        let parsed = DataUrl::parse(&url).unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.data, PNG_1X1);
        assert_eq!(parsed.to_string(), url);
    }

    #[test]
    fn test_parse_empty_payload() {
        assert!(DataUrl::parse("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_validate_png_upload() {
        let bytes = base64::engine::general_purpose::STANDARD.decode(PNG_1X1).unwrap();
        assert_eq!(validate_upload(&bytes, Some("text/plain")).unwrap(), "image/png");
    }

    #[test]
    fn test_validate_rejects_non_image() {
        let result = validate_upload(b"just some notes", Some("text/plain"));
        assert!(matches!(result, Err(ProxyError::NotAnImage(_))));

        let result = validate_upload(b"just some notes", None);
        assert!(matches!(result, Err(ProxyError::NotAnImage(_))));
    }

    #[test]
    fn test_validate_trusts_declared_image_type() {
        assert_eq!(validate_upload(b"opaque", Some("image/avif")).unwrap(), "image/avif");
    }
}
