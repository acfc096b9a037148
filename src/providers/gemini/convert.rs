//! Gemini request/response conversion helpers (pure functions)
//!
//! These helpers convert a [`DescriptionRequest`] into Gemini's typed request
//! structures and pull the description text back out, without performing
//! HTTP calls.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ArtifactError, Result};
use crate::types::{Description, DescriptionRequest, ImageRecord, RequestPart};

use super::types::{Blob, Content, GenerateContentRequest, GenerateContentResponse, Part};

/// Convert one image record to an inline data part
pub fn image_to_part(image: &ImageRecord) -> Part {
    Part::InlineData {
        inline_data: Blob {
            mime_type: image.mime_type.clone(),
            data: STANDARD.encode(&image.data),
        },
    }
}

/// Convert request parts to Gemini parts, keeping their order.
///
/// Empty text parts are dropped; the API rejects them.
pub fn convert_parts(parts: &[RequestPart]) -> Vec<Part> {
    parts
        .iter()
        .filter_map(|part| match part {
            RequestPart::Text(text) if text.is_empty() => None,
            RequestPart::Text(text) => Some(Part::Text {
                text: text.clone(),
                thought: None,
            }),
            RequestPart::Image(image) => Some(image_to_part(image)),
        })
        .collect()
}

/// Build the request body for Gemini API
///
/// # Errors
///
/// Fails if no non-empty part remains after conversion.
pub fn build_request_body(request: &DescriptionRequest) -> Result<GenerateContentRequest> {
    let parts = convert_parts(request.parts());
    if parts.is_empty() {
        return Err(ArtifactError::Packaging(
            "Request has no content".to_string(),
        ));
    }
    Ok(GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
    })
}

/// Extract the description text from a response.
///
/// Joins every non-thought text part of the first candidate.
///
/// # Errors
///
/// Returns [`ArtifactError::EmptyResponse`] when the response carries no text,
/// naming the block or finish reason when the API gives one.
pub fn extract_description(response: GenerateContentResponse) -> Result<Description> {
    let block_reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone());

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ArtifactError::EmptyResponse(match block_reason {
            Some(reason) => format!("The request was blocked ({reason})."),
            None => "The model returned no candidates.".to_string(),
        }));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| match part {
            Part::Text { text, thought } if thought != Some(true) => Some(text),
            _ => None,
        })
        .collect();

    if text.is_empty() {
        return Err(ArtifactError::EmptyResponse(match candidate.finish_reason {
            Some(reason) => format!("The model returned no text (finish reason: {reason})."),
            None => "The model returned no text.".to_string(),
        }));
    }

    Ok(Description {
        text,
        model_version: response.model_version,
    })
}
