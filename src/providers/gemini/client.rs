//! Gemini Client Implementation

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{ArtifactError, Result};
use crate::traits::DescribeImage;
use crate::types::{Description, DescriptionRequest};

use super::config::GeminiConfig;
use super::types::GenerateContentResponse;

/// Gemini client that implements the `DescribeImage` trait
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// HTTP client for making requests
    http_client: HttpClient,
    /// Gemini configuration
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
            ArtifactError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a new Gemini client with a custom HTTP client
    pub const fn with_http_client(config: GeminiConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Build a client from the startup configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::MissingCredential`] when the app has no API key.
    pub fn from_app_config(app: &AppConfig) -> Result<Self> {
        Self::new(GeminiConfig::from_app_config(app)?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the model
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the configuration (for testing and debugging)
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Send one `generateContent` call and return the raw response.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn generate_content(
        &self,
        request: &DescriptionRequest,
    ) -> Result<GenerateContentResponse> {
        let body = super::convert::build_request_body(request)?;
        let headers = super::headers::build_gemini_headers(self.config.api_key.expose_secret())?;
        let url = self.config.generate_content_url();

        tracing::debug!(url = %url, parts = body.contents[0].parts.len(), "sending generateContent");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let resp_headers = response.headers().clone();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(super::errors::classify_http_error(
                status.as_u16(),
                &text,
                &resp_headers,
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "gemini usage"
            );
        }
        Ok(parsed)
    }
}

#[async_trait]
impl DescribeImage for GeminiClient {
    async fn describe(&self, request: DescriptionRequest) -> Result<Description> {
        let response = self.generate_content(&request).await?;
        super::convert::extract_description(response)
    }

    fn provider_id(&self) -> &'static str {
        "gemini"
    }
}
