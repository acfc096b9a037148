//! Gemini HTTP header helpers.
//!
//! - Always include `Content-Type: application/json`
//! - Authenticate with `x-goog-api-key`
//! - Identify ourselves with a `User-Agent`

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::{ArtifactError, Result};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Build the headers for one Gemini request
///
/// # Errors
///
/// Fails when the key contains characters not allowed in a header value.
pub fn build_gemini_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let version = env!("CARGO_PKG_VERSION");
    if let Ok(v) = HeaderValue::from_str(&format!("artifact-lens/{version}")) {
        headers.insert(USER_AGENT, v);
    }

    if !api_key.is_empty() {
        let mut value = HeaderValue::from_str(api_key).map_err(|_| {
            ArtifactError::Configuration("API key contains invalid header characters".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, value);
    }

    Ok(headers)
}
