//! HTML rendering for the single-page form
//!
//! The page is one tera template rendered with autoescaping on, so nothing
//! from the user or the model is ever trusted as markup.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{ArtifactError, MISSING_CREDENTIAL_MESSAGE, Result};
use crate::submission::SubmissionOutcome;
use crate::types::{ALLOWED_EXTENSIONS, Upload};

/// Browser tab title
pub const PAGE_TITLE: &str = "Gemini Historical Artifact Description App";
/// Label of the optional text box
pub const INPUT_LABEL: &str = "📝 Input Prompt (Optional):";
/// Label of the file picker
pub const UPLOAD_LABEL: &str = "🖼️ Choose an image of an artifact...";
/// Label of the submit button
pub const SUBMIT_LABEL: &str = "🚀 Generate Artifact Description";
/// Heading above the model's answer
pub const RESULT_HEADING: &str = "📜 Description of the Artifact:";
/// Caption under the echoed image
pub const IMAGE_CAPTION: &str = "Uploaded Image.";

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

/// Everything needed to render one page.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Whether a model credential was found at startup
    pub configured: bool,
    /// Text to keep in the input box
    pub input_text: &'a str,
    /// Image to echo back
    pub upload: Option<&'a Upload>,
    /// Outcome of the submission, if this page answers one
    pub outcome: Option<&'a SubmissionOutcome>,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    input_label: &'a str,
    upload_label: &'a str,
    submit_label: &'a str,
    accept: String,
    banner: Option<&'a str>,
    input_text: &'a str,
    image: Option<EchoedImage<'a>>,
    warning: Option<&'a str>,
    described: bool,
    result_heading: &'a str,
    result: &'a str,
    error: Option<String>,
}

#[derive(Serialize)]
struct EchoedImage<'a> {
    src: String,
    alt: &'a str,
    caption: &'a str,
}

impl<'a> PageContext<'a> {
    fn from_view(view: &PageView<'a>) -> Self {
        let accept = ALLOWED_EXTENSIONS
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",");

        let mut ctx = Self {
            title: PAGE_TITLE,
            input_label: INPUT_LABEL,
            upload_label: UPLOAD_LABEL,
            submit_label: SUBMIT_LABEL,
            accept,
            banner: (!view.configured).then_some(MISSING_CREDENTIAL_MESSAGE),
            input_text: view.input_text,
            image: view.upload.map(|upload| EchoedImage {
                src: data_url(upload),
                alt: &upload.file_name,
                caption: IMAGE_CAPTION,
            }),
            warning: None,
            described: false,
            result_heading: RESULT_HEADING,
            result: "",
            error: None,
        };

        match view.outcome {
            Some(SubmissionOutcome::Warning(message)) => ctx.warning = Some(message.as_str()),
            Some(SubmissionOutcome::Described(description)) => {
                ctx.described = true;
                ctx.result = &description.text;
            }
            Some(outcome @ SubmissionOutcome::Failed(_)) => ctx.error = outcome.error_line(),
            None => {}
        }
        ctx
    }
}

/// Build a `data:` URL for an upload so it can be echoed without storage.
pub fn data_url(upload: &Upload) -> String {
    format!(
        "data:{};base64,{}",
        upload.content_type,
        STANDARD.encode(&upload.data)
    )
}

/// Render the full page.
///
/// # Errors
///
/// Fails only if the page template itself is broken.
pub fn render_page(view: &PageView<'_>) -> Result<String> {
    let context = Context::from_serialize(PageContext::from_view(view))
        .map_err(|e| ArtifactError::Server(format!("Failed to build page context: {e}")))?;
    Tera::one_off(PAGE_TEMPLATE, &context, true)
        .map_err(|e| ArtifactError::Server(format!("Failed to render page: {e}")))
}
