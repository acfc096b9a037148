//! Submission handling
//!
//! One submission runs from the moment submit is pressed until it ends in
//! exactly one of three page states. The handler never panics and never
//! returns an `Err`; every failure is folded into a [`SubmissionOutcome`] the
//! page can render.

use tracing::Instrument;

use crate::error::{ArtifactError, ErrorCategory, NO_UPLOAD_MESSAGE};
use crate::image::{ensure_allowed, package_upload};
use crate::traits::DescribeImage;
use crate::types::{Description, DescriptionRequest, Upload};

/// What the user sent with one press of the submit button.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Optional free text; empty when the user typed nothing
    pub text: String,
    /// The chosen image, if any
    pub upload: Option<Upload>,
}

impl Submission {
    /// Create a submission
    pub fn new(text: impl Into<String>, upload: Option<Upload>) -> Self {
        Self {
            text: text.into(),
            upload,
        }
    }
}

/// Page states a rendered page can show.
///
/// Awaiting a submission is not listed: it only lasts for the duration of
/// [`handle_submission`] and never reaches a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Nothing submitted yet, or submission refused with a warning
    Idle,
    /// The model's text is on screen
    DisplayingResult,
    /// An error line is on screen
    DisplayingError,
}

/// Result of one submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Refused before any model call; the page returns to idle with a warning
    Warning(String),
    /// The model answered
    Described(Description),
    /// Packaging or the model call failed
    Failed(ArtifactError),
}

impl SubmissionOutcome {
    /// State the page ends up in
    pub const fn page_state(&self) -> PageState {
        match self {
            Self::Warning(_) => PageState::Idle,
            Self::Described(_) => PageState::DisplayingResult,
            Self::Failed(_) => PageState::DisplayingError,
        }
    }

    /// The line shown for a failure, `Error: <message>`
    pub fn error_line(&self) -> Option<String> {
        match self {
            Self::Failed(err) => Some(format!("Error: {}", err.user_message())),
            _ => None,
        }
    }
}

/// Run one submission against an optional model.
///
/// `model` is `None` when no credential was configured at startup; in that
/// case the call is blocked and a [`ArtifactError::MissingCredential`] error is
/// shown instead.
pub async fn handle_submission(
    submission: &Submission,
    model: Option<&dyn DescribeImage>,
) -> SubmissionOutcome {
    let submission_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("submission", id = %submission_id);
    run(submission, model).instrument(span).await
}

async fn run(submission: &Submission, model: Option<&dyn DescribeImage>) -> SubmissionOutcome {
    let Some(upload) = submission.upload.as_ref() else {
        tracing::info!("submit without upload");
        return SubmissionOutcome::Warning(NO_UPLOAD_MESSAGE.to_string());
    };

    if let Err(err) = ensure_allowed(upload) {
        tracing::info!(file_name = %upload.file_name, "rejected upload type");
        return SubmissionOutcome::Warning(err.user_message());
    }

    let Some(model) = model else {
        tracing::warn!("model client disabled, no credential configured");
        return SubmissionOutcome::Failed(ArtifactError::MissingCredential);
    };

    let images = match package_upload(Some(upload)) {
        Ok(images) => images,
        Err(err) => return failed(err),
    };

    let request = DescriptionRequest::artifact(submission.text.clone(), images);
    tracing::info!(
        provider = model.provider_id(),
        mime_type = %upload.content_type,
        bytes = upload.len(),
        has_text = !submission.text.is_empty(),
        "requesting description"
    );

    match model.describe(request).await {
        Ok(description) => {
            tracing::info!(chars = description.text.len(), "description received");
            SubmissionOutcome::Described(description)
        }
        Err(err) => failed(err),
    }
}

fn failed(err: ArtifactError) -> SubmissionOutcome {
    match err.category() {
        ErrorCategory::Upstream => tracing::warn!(error = %err, "model call failed"),
        _ => tracing::error!(error = %err, "submission failed"),
    }
    SubmissionOutcome::Failed(err)
}
