//! Multipart form decoding
//!
//! Field names: `input` (optional text) and `image` (optional file).

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::submission::Submission;
use crate::types::Upload;
use crate::utils::mime::resolve_upload_mime;

/// Name of the text field
pub const TEXT_FIELD: &str = "input";
/// Name of the file field
pub const IMAGE_FIELD: &str = "image";

/// A form that could not be decoded.
#[derive(Debug)]
pub struct FormRejection {
    /// Status to answer with (413 for oversized bodies)
    pub status: StatusCode,
    /// Reason, safe to show
    pub message: String,
}

impl From<MultipartError> for FormRejection {
    fn from(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

/// Decode a posted form into a [`Submission`].
///
/// A file part with no name and no bytes is what browsers send when nothing
/// was chosen; it counts as no upload.
///
/// # Errors
///
/// Fails when the multipart stream is malformed or exceeds the body limit.
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, FormRejection> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(TEXT_FIELD) => {
                submission.text = field.text().await?;
            }
            Some(IMAGE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let declared = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                let content_type = resolve_upload_mime(declared.as_deref(), &file_name, &data);
                submission.upload = Some(Upload::new(file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    Ok(submission)
}
