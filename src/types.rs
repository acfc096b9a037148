//! Core data types
//!
//! An [`Upload`] is what the user hands us, an [`ImageRecord`] is what we hand
//! the model, and a [`DescriptionRequest`] is the ordered list of parts sent in
//! one call.

use serde::{Deserialize, Serialize};

/// Instruction appended after the user's text and image on every request.
///
/// Defines the historian persona; it is never user-editable.
pub const SYSTEM_PROMPT: &str = "You are an expert historian and archaeologist. Examine the uploaded image of the historical artifact and provide: 1) likely name, 2) origin and time period, 3) materials and craftsmanship, 4) historical/cultural significance, 5) interesting facts or stories.";

/// File extensions accepted by the uploader.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// A user-provided image file for one submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name as sent by the browser
    pub file_name: String,
    /// Declared content type, e.g. `image/jpeg`
    pub content_type: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl Upload {
    /// Create a new upload
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Lower-cased file extension, if the name has one
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Size of the upload in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the upload carries no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Packaged image record sent to the model.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// MIME type copied from the upload
    pub mime_type: String,
    /// Raw bytes copied from the upload, untouched
    pub data: Vec<u8>,
}

impl std::fmt::Debug for ImageRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRecord")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// One element of the ordered request sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    /// Plain text
    Text(String),
    /// Inline image
    Image(ImageRecord),
}

impl RequestPart {
    /// Text content, if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    /// Image record, if this is an image part
    pub const fn as_image(&self) -> Option<&ImageRecord> {
        match self {
            Self::Image(image) => Some(image),
            Self::Text(_) => None,
        }
    }
}

/// The ordered parts of one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionRequest {
    parts: Vec<RequestPart>,
}

impl DescriptionRequest {
    /// Build the artifact request: user text, then the images, then the fixed prompt.
    pub fn artifact(user_text: impl Into<String>, images: Vec<ImageRecord>) -> Self {
        let mut parts = Vec::with_capacity(images.len() + 2);
        parts.push(RequestPart::Text(user_text.into()));
        parts.extend(images.into_iter().map(RequestPart::Image));
        parts.push(RequestPart::Text(SYSTEM_PROMPT.to_string()));
        Self { parts }
    }

    /// Parts in send order
    pub fn parts(&self) -> &[RequestPart] {
        &self.parts
    }

    /// Consume the request and return its parts
    pub fn into_parts(self) -> Vec<RequestPart> {
        self.parts
    }
}

/// Text returned by the model for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// Generated text
    pub text: String,
    /// Model version reported by the API, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl Description {
    /// Create a description with only text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_version: None,
        }
    }
}
