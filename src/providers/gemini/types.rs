//! Gemini wire types
//!
//! Only the subset of the `generateContent` schema this app sends or reads.
//! Reference: <https://ai.google.dev/api/generate-content>

use serde::{Deserialize, Serialize};

/// Gemini Generate Content Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Required. The content of the current conversation with the model.
    pub contents: Vec<Content>,
}

/// A multi-part message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// `user` or `model`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One piece of a [`Content`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text part
    Text {
        /// Text content
        text: String,
        /// Set on reasoning summaries from thinking models
        #[serde(skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
    },
    /// Inline binary data
    InlineData {
        /// Inline data blob
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// Anything else the API sends back (function calls, code execution, ...)
    Other(serde_json::Value),
}

/// Raw media bytes, base64 encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blob {
    /// IANA MIME type of the source data
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// Gemini Generate Content Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate responses from the model.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Returns the prompt's feedback related to the content filters.
    #[serde(skip_serializing_if = "Option::is_none", rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Output only. Metadata on the generation requests' token usage.
    #[serde(skip_serializing_if = "Option::is_none", rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
    /// Output only. The model version used to generate the response.
    #[serde(skip_serializing_if = "Option::is_none", rename = "modelVersion")]
    pub model_version: Option<String>,
    /// Output only. Identifies this response.
    #[serde(skip_serializing_if = "Option::is_none", rename = "responseId")]
    pub response_id: Option<String>,
}

/// A response candidate generated from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Generated content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(skip_serializing_if = "Option::is_none", rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Content filter feedback for the prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptFeedback {
    /// Set when the prompt was blocked
    #[serde(skip_serializing_if = "Option::is_none", rename = "blockReason")]
    pub block_reason: Option<String>,
}

/// Token accounting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UsageMetadata {
    /// Tokens in the prompt
    #[serde(skip_serializing_if = "Option::is_none", rename = "promptTokenCount")]
    pub prompt_token_count: Option<u32>,
    /// Tokens across all candidates
    #[serde(skip_serializing_if = "Option::is_none", rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u32>,
    /// Total tokens
    #[serde(skip_serializing_if = "Option::is_none", rename = "totalTokenCount")]
    pub total_token_count: Option<u32>,
}

/// Error envelope returned on non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details
    pub error: ErrorBody,
}

/// Body of [`ErrorEnvelope`]
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code
    #[serde(default)]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Canonical status name such as `UNAUTHENTICATED`
    #[serde(default)]
    pub status: Option<String>,
}
