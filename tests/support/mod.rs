//! Shared test helpers: a recording model fake and a multipart body builder

#![allow(dead_code)]

use std::sync::Mutex;

use artifact_lens::prelude::*;
use async_trait::async_trait;

/// Smallest JPEG header we need for realistic bytes
pub const JPEG_BYTES: [u8; 12] = [
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01,
];

/// Boundary used by [`multipart_body`]
pub const BOUNDARY: &str = "artifact-lens-test-boundary";

/// A `DescribeImage` fake that records every request.
#[derive(Default)]
pub struct RecordingModel {
    pub calls: Mutex<Vec<DescriptionRequest>>,
    pub reply: Option<String>,
    pub error: Option<String>,
}

impl RecordingModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_auth(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DescribeImage for RecordingModel {
    async fn describe(&self, request: DescriptionRequest) -> Result<Description> {
        self.calls.lock().unwrap().push(request);
        if let Some(message) = &self.error {
            return Err(ArtifactError::Authentication(message.clone()));
        }
        Ok(Description::new(
            self.reply.clone().unwrap_or_else(|| "A description.".to_string()),
        ))
    }

    fn provider_id(&self) -> &'static str {
        "recording"
    }
}

/// One part of a hand-built multipart body
pub enum FormPart<'a> {
    Text { name: &'a str, value: &'a str },
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: Option<&'a str>,
        data: &'a [u8],
    },
}

/// Encode parts as `multipart/form-data` using [`BOUNDARY`]
pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                    )
                    .as_bytes(),
                );
                if let Some(ct) = content_type {
                    body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Content-Type header value matching [`multipart_body`]
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
