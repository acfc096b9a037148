//! HTTP error classification for Gemini responses

use reqwest::header::HeaderMap;

use crate::error::ArtifactError;

use super::types::ErrorEnvelope;

/// Pull the human-readable message out of a Gemini error body, if present.
pub fn error_message_from_body(body_text: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body_text)
        .ok()
        .and_then(|env| env.error.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Classify a non-success response.
///
/// The API's own message is kept verbatim so it can be shown to the user.
pub fn classify_http_error(status: u16, body_text: &str, headers: &HeaderMap) -> ArtifactError {
    let message = error_message_from_body(body_text).unwrap_or_else(|| {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed");
        format!("HTTP {status}: {reason}")
    });

    let request_id = headers
        .get("x-goog-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    let body_sample = body_text.chars().take(200).collect::<String>();
    tracing::debug!(status, request_id, body_sample = %body_sample, "gemini request failed");

    match status {
        401 | 403 => ArtifactError::Authentication(message),
        429 => ArtifactError::RateLimit(message),
        _ => ArtifactError::api_error(status, message),
    }
}
