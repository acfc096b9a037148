//! Gemini client configuration
//!
//! Built from [`AppConfig`] once the credential is known to be present.

use secrecy::{ExposeSecret, SecretString};

use crate::config::AppConfig;
use crate::error::{ArtifactError, Result};

/// Default Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for every description. Not configurable at runtime.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Gemini client configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key for authentication (securely stored)
    pub api_key: SecretString,
    /// Base URL for the Gemini API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// HTTP timeout in seconds; `None` keeps reqwest's default
    pub timeout: Option<u64>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field(
                "api_key_present",
                &(!self.api_key.expose_secret().is_empty()),
            )
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a new Gemini configuration with the given API key
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
            timeout: None,
        }
    }

    /// Derive the client configuration from the app configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::MissingCredential`] when no API key was found.
    pub fn from_app_config(app: &AppConfig) -> Result<Self> {
        let api_key = app
            .credential
            .secret()
            .cloned()
            .ok_or(ArtifactError::MissingCredential)?;
        let mut config = Self {
            api_key,
            ..Self::new(String::new())
        };
        if let Some(base_url) = &app.gemini_base_url {
            config.base_url = base_url.clone();
        }
        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set HTTP timeout
    pub const fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// URL of the non-streaming generate endpoint
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
