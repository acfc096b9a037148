//! # Artifact Lens
//!
//! A single-page web form: upload a photo of a historical artifact, optionally
//! add a question, and get a historian's description back from Google Gemini.
//!
#![deny(unsafe_code)]

//! ## Flow
//!
//! 1. [`config::AppConfig`] reads `GOOGLE_API_KEY` (environment or `.env`) once at startup.
//! 2. [`server`] renders the form and decodes each posted submission.
//! 3. [`submission::handle_submission`] gates on an upload, packages it with
//!    [`image::package_upload`], and asks a [`traits::DescribeImage`] for text.
//! 4. [`providers::gemini::GeminiClient`] sends `[user text, image, historian prompt]`
//!    in one `generateContent` call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use artifact_lens::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default().with_api_key("your-api-key");
//!     let client = GeminiClient::from_app_config(&config)?;
//!
//!     let upload = Upload::new("statue.jpg", "image/jpeg", std::fs::read("statue.jpg")?);
//!     let images = package_upload(Some(&upload))?;
//!     let description = client.describe(DescriptionRequest::artifact("", images)).await?;
//!     println!("{}", description.text);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod image;
pub mod providers;
pub mod server;
pub mod submission;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod utils;

/// Commonly used items
pub mod prelude {
    pub use crate::config::{AppConfig, CredentialStatus};
    pub use crate::error::{ArtifactError, ErrorCategory, Result};
    pub use crate::image::package_upload;
    pub use crate::providers::gemini::{GeminiClient, GeminiConfig};
    pub use crate::submission::{PageState, Submission, SubmissionOutcome, handle_submission};
    pub use crate::traits::DescribeImage;
    pub use crate::types::{
        Description, DescriptionRequest, ImageRecord, RequestPart, SYSTEM_PROMPT, Upload,
    };
}

pub use error::{ArtifactError, Result};
