//! Error Handling Module
//!
//! A single error type covers every way a submission can fail, from a missing
//! credential at startup to a malformed response from the model API.
//!
//! # Example
//!
//! ```rust,ignore
//! use artifact_lens::error::{ArtifactError, ErrorCategory};
//!
//! let error = ArtifactError::api_error(404, "model not found");
//! assert_eq!(error.category(), ErrorCategory::Upstream);
//! assert_eq!(error.user_message(), "model not found");
//! ```

use thiserror::Error;

/// Banner text shown when no model credential could be found at startup.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API Key not found. Please check your .env file.";

/// Warning shown when the form is submitted without an image.
pub const NO_UPLOAD_MESSAGE: &str = "Please upload an image first.";

/// Errors produced while configuring the app or handling a submission.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The model credential is absent; the model client is disabled.
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,

    /// The packager was invoked without an upload.
    #[error("No file uploaded")]
    NoUpload,

    /// The upload's file extension is not one of the accepted image types.
    #[error("Unsupported file type: {0}. Please upload a JPG, JPEG or PNG image.")]
    UnsupportedFileType(String),

    /// The upload could not be turned into an image record.
    #[error("{0}")]
    Packaging(String),

    /// Invalid startup configuration (bind address, size limit, HTTP client).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure talking to the model API.
    #[error("{0}")]
    Http(String),

    /// The model API rejected the credential.
    #[error("{0}")]
    Authentication(String),

    /// The model API reported a quota or rate limit.
    #[error("{0}")]
    RateLimit(String),

    /// Any other non-success answer from the model API.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the API error envelope
        message: String,
    },

    /// The model API answered with a body we could not decode.
    #[error("Malformed response: {0}")]
    Parse(String),

    /// The model API answered but produced no text.
    #[error("{0}")]
    EmptyResponse(String),

    /// Web server failure (bind, accept, multipart decoding).
    #[error("Server error: {0}")]
    Server(String),
}

/// Coarse grouping used to pick the log level of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Startup configuration problems
    Configuration,
    /// Something the user can fix by changing their input
    UserInput,
    /// Failures reported by, or while reaching, the model API
    Upstream,
    /// Bugs and local failures
    Internal,
}

impl ArtifactError {
    /// Build an API error from a status code and message.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// The text displayed to the user after the `Error: ` prefix.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Classify the error.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingCredential | Self::Configuration(_) => ErrorCategory::Configuration,
            Self::NoUpload | Self::UnsupportedFileType(_) => ErrorCategory::UserInput,
            Self::Http(_)
            | Self::Authentication(_)
            | Self::RateLimit(_)
            | Self::Api { .. }
            | Self::Parse(_)
            | Self::EmptyResponse(_) => ErrorCategory::Upstream,
            Self::Packaging(_) | Self::Server(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status reported by the model API, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ArtifactError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ArtifactError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ArtifactError>;
