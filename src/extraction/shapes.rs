// Inline image lookup across known response shapes
// Author: kelexine (https://github.com/kelexine)

use crate::models::ExtractedImage;
use serde_json::Value;
use std::fmt;

/// Media type assumed when a payload declares none.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// A place where an inline image has been observed in `generateContent`
/// responses. Variants are listed in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeShape {
    /// `candidates[0].content.parts[i].inlineData`
    CandidateContentParts,
    /// `candidates[0].inlineData`
    CandidateInline,
    /// `candidates[0].parts[i].inlineData`
    CandidateParts,
    /// `parts[i].inlineData` or `parts.inlineData`
    RootParts,
    /// `inlineData`
    RootInline,
}

impl EnvelopeShape {
    pub const PRIORITY: [EnvelopeShape; 5] = [
        EnvelopeShape::CandidateContentParts,
        EnvelopeShape::CandidateInline,
        EnvelopeShape::CandidateParts,
        EnvelopeShape::RootParts,
        EnvelopeShape::RootInline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeShape::CandidateContentParts => "candidate_content_parts",
            EnvelopeShape::CandidateInline => "candidate_inline",
            EnvelopeShape::CandidateParts => "candidate_parts",
            EnvelopeShape::RootParts => "root_parts",
            EnvelopeShape::RootInline => "root_inline",
        }
    }

    /// Try this shape alone against `doc`.
    pub fn probe(&self, doc: &Value) -> Option<ExtractedImage> {
        match self {
            EnvelopeShape::CandidateContentParts => {
                let parts = first_candidate(doc)?.get("content")?.get("parts")?.as_array()?;
                first_inline_in(parts)
            }
            EnvelopeShape::CandidateInline => inline_image(first_candidate(doc)?),
            EnvelopeShape::CandidateParts => {
                let parts = first_candidate(doc)?.get("parts")?.as_array()?;
                first_inline_in(parts)
            }
            EnvelopeShape::RootParts => match doc.get("parts")? {
                Value::Array(parts) => first_inline_in(parts),
                part @ Value::Object(_) => inline_image(part),
                _ => None,
            },
            EnvelopeShape::RootInline => inline_image(doc),
        }
    }
}

impl fmt::Display for EnvelopeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find the first inline image in `doc`, trying shapes in priority order.
///
/// Returns the matching shape alongside the image.
pub fn locate_image(doc: &Value) -> Option<(EnvelopeShape, ExtractedImage)> {
    EnvelopeShape::PRIORITY
        .iter()
        .find_map(|shape| shape.probe(doc).map(|image| (*shape, image)))
}

/// Find the first inline image in `doc`.
pub fn extract_image(doc: &Value) -> Option<ExtractedImage> {
    locate_image(doc).map(|(_, image)| image)
}

fn first_candidate(doc: &Value) -> Option<&Value> {
    doc.get("candidates")?.as_array()?.first()
}

// Keeps scanning past a part whose inline payload is empty instead of
// giving up on the whole array.
fn first_inline_in(parts: &[Value]) -> Option<ExtractedImage> {
    parts.iter().find_map(inline_image)
}

/// Read the inline-data field carried directly by `holder`.
///
/// `inlineData` wins over `inline_data` when both are objects. The payload
/// must be a non-empty string; the media type falls back to `image/png`.
fn inline_image(holder: &Value) -> Option<ExtractedImage> {
    let inline = holder
        .get("inlineData")
        .filter(|v| v.is_object())
        .or_else(|| holder.get("inline_data").filter(|v| v.is_object()))?;

    let data = non_empty_str(inline.get("data"))?;
    let mime_type = non_empty_str(inline.get("mimeType"))
        .or_else(|| non_empty_str(inline.get("mime_type")))
        .unwrap_or(DEFAULT_MIME_TYPE);

    Some(ExtractedImage {
        mime_type: mime_type.to_string(),
        base64_data: data.to_string(),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value?.as_str().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image(mime: &str, data: &str) -> ExtractedImage {
        ExtractedImage {
            mime_type: mime.to_string(),
            base64_data: data.to_string(),
        }
    }

    #[test]
    fn test_camel_case_under_content_parts() {
        let doc = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your colorized page." },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "AAAA" } }
                    ]
                }
            }]
        });
        assert_eq!(
            locate_image(&doc),
            Some((EnvelopeShape::CandidateContentParts, image("image/jpeg", "AAAA")))
        );
    }

    #[test]
    fn test_snake_case_under_content_parts() {
        let doc = json!({
            "candidates": [{
                "content": {
                    "parts": [{ "inline_data": { "mime_type": "image/webp", "data": "BBBB" } }]
                }
            }]
        });
        assert_eq!(extract_image(&doc), Some(image("image/webp", "BBBB")));
    }

    #[test]
    fn test_candidate_level_inline() {
        let doc = json!({
            "candidates": [{ "inlineData": { "mimeType": "image/png", "data": "CCCC" } }]
        });
        assert_eq!(
            locate_image(&doc).map(|(shape, _)| shape),
            Some(EnvelopeShape::CandidateInline)
        );
    }

    #[test]
    fn test_candidate_parts_bypassing_content() {
        let doc = json!({
            "candidates": [{
                "parts": [{ "text": "hi" }, { "inline_data": { "data": "DDDD" } }]
            }]
        });
        assert_eq!(
            locate_image(&doc),
            Some((EnvelopeShape::CandidateParts, image(DEFAULT_MIME_TYPE, "DDDD")))
        );
    }

    #[test]
    fn test_root_parts_array_and_object() {
        let array = json!({ "parts": [{ "inlineData": { "mimeType": "image/gif", "data": "EEEE" } }] });
        let object = json!({ "parts": { "inlineData": { "mimeType": "image/gif", "data": "FFFF" } } });

        assert_eq!(
            locate_image(&array),
            Some((EnvelopeShape::RootParts, image("image/gif", "EEEE")))
        );
        assert_eq!(
            locate_image(&object),
            Some((EnvelopeShape::RootParts, image("image/gif", "FFFF")))
        );
    }

    #[test]
    fn test_root_inline() {
        let doc = json!({ "inline_data": { "mime_type": "image/png", "data": "GGGG" } });
        assert_eq!(
            locate_image(&doc),
            Some((EnvelopeShape::RootInline, image("image/png", "GGGG")))
        );
    }

    #[test]
    fn test_text_only_refusal_is_not_found() {
        let doc = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I can't help with that." }] },
                "finishReason": "SAFETY"
            }]
        });
        assert_eq!(extract_image(&doc), None);
    }

    #[test]
    fn test_error_envelope_and_scalars_are_not_found() {
        assert_eq!(extract_image(&json!({ "error": { "code": 400 } })), None);
        assert_eq!(extract_image(&json!(null)), None);
        assert_eq!(extract_image(&json!([1, 2, 3])), None);
        assert_eq!(extract_image(&json!({ "candidates": "nope", "parts": 7 })), None);
    }

    #[test]
    fn test_earliest_branch_wins() {
        let doc = json!({
            "inlineData": { "mimeType": "image/png", "data": "ROOT" },
            "parts": [{ "inlineData": { "mimeType": "image/png", "data": "ROOTPARTS" } }],
            "candidates": [{
                "inlineData": { "mimeType": "image/png", "data": "CANDIDATE" },
                "content": {
                    "parts": [{ "inlineData": { "mimeType": "image/png", "data": "NESTED" } }]
                }
            }]
        });
        assert_eq!(
            locate_image(&doc),
            Some((EnvelopeShape::CandidateContentParts, image("image/png", "NESTED")))
        );
    }

    #[test]
    fn test_camel_case_preferred_over_snake_case() {
        let doc = json!({
            "inlineData": { "mimeType": "image/jpeg", "data": "CAMEL" },
            "inline_data": { "mime_type": "image/png", "data": "SNAKE" }
        });
        assert_eq!(extract_image(&doc), Some(image("image/jpeg", "CAMEL")));
    }

    #[test]
    fn test_only_first_candidate_is_inspected() {
        let doc = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "no image" }] } },
                { "content": { "parts": [{ "inlineData": { "data": "SECOND" } }] } }
            ]
        });
        assert_eq!(extract_image(&doc), None);
    }

    #[test]
    fn test_empty_payload_falls_through() {
        let doc = json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "" } }] }
            }],
            "inlineData": { "mimeType": "image/png", "data": "ROOT" }
        });
        assert_eq!(
            locate_image(&doc).map(|(shape, _)| shape),
            Some(EnvelopeShape::RootInline)
        );
    }

    #[test]
    fn test_empty_payload_does_not_hide_later_part() {
        let doc = json!({
            "candidates": [{
                "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "" } },
                    { "inline_data": { "mime_type": "image/webp", "data": "LATER" } }
                ] }
            }]
        });
        assert_eq!(
            locate_image(&doc),
            Some((EnvelopeShape::CandidateContentParts, image("image/webp", "LATER")))
        );
    }

    #[test]
    fn test_empty_mime_type_uses_default() {
        let doc = json!({ "inlineData": { "mimeType": "", "data": "HHHH" } });
        assert_eq!(extract_image(&doc), Some(image(DEFAULT_MIME_TYPE, "HHHH")));
    }
}
