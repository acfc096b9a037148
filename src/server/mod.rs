//! Web surface
//!
//! Serves the single-page form with axum. Every interaction is one request
//! that re-renders the whole page:
//!
//! - `GET /` renders the idle form
//! - `POST /` (multipart: `input`, `image`) runs one submission
//! - `GET /healthz` reports liveness and whether the model is configured
//!
//! ## Example
//!
//! ```rust,no_run
//! use artifact_lens::config::AppConfig;
//! use artifact_lens::server::{AppState, router};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = router(AppState::from_config(&config)?, config.max_upload_bytes);
//! let listener = tokio::net::TcpListener::bind(config.bind).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod form;
pub mod render;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;

use crate::config::AppConfig;
use crate::error::{ArtifactError, Result};
use crate::image::is_allowed_upload;
use crate::providers::gemini::GeminiClient;
use crate::submission::{SubmissionOutcome, handle_submission};
use crate::traits::DescribeImage;

use render::{PageView, render_page};

/// Shared, immutable application state.
#[derive(Clone)]
pub struct AppState {
    model: Option<Arc<dyn DescribeImage>>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("model", &self.model.as_ref().map(|m| m.provider_id()))
            .finish()
    }
}

impl AppState {
    /// Build state from the startup configuration.
    ///
    /// Without a credential the state is unconfigured: the banner is shown and
    /// no model client exists.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if !config.is_configured() {
            tracing::warn!("{}", crate::error::MISSING_CREDENTIAL_MESSAGE);
            return Ok(Self::unconfigured());
        }
        let client = GeminiClient::from_app_config(config)?;
        Ok(Self::with_model(Arc::new(client)))
    }

    /// State backed by the given model
    pub fn with_model(model: Arc<dyn DescribeImage>) -> Self {
        Self { model: Some(model) }
    }

    /// State without a model client
    pub const fn unconfigured() -> Self {
        Self { model: None }
    }

    /// Whether a model client is available
    pub const fn is_configured(&self) -> bool {
        self.model.is_some()
    }
}

/// Build the router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/healthz", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
///
/// # Errors
///
/// Fails if the address cannot be bound or the server stops abnormally.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| ArtifactError::Server(format!("bind {}: {e}", config.bind)))?;
    tracing::info!(addr = %config.bind, "listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ArtifactError::Server(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn index(State(state): State<AppState>) -> Response {
    page(
        StatusCode::OK,
        &PageView {
            configured: state.is_configured(),
            ..Default::default()
        },
    )
}

async fn submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match form::read_submission(multipart).await {
        Ok(submission) => submission,
        Err(rejection) => {
            tracing::warn!(status = %rejection.status, error = %rejection.message, "bad form post");
            let outcome = SubmissionOutcome::Failed(ArtifactError::Server(rejection.message));
            return page(
                rejection.status,
                &PageView {
                    configured: state.is_configured(),
                    outcome: Some(&outcome),
                    ..Default::default()
                },
            );
        }
    };

    let outcome = handle_submission(&submission, state.model.as_deref()).await;

    // refused file types are not echoed back
    let echoed = submission.upload.as_ref().filter(|u| is_allowed_upload(u));

    page(
        StatusCode::OK,
        &PageView {
            configured: state.is_configured(),
            input_text: &submission.text,
            upload: echoed,
            outcome: Some(&outcome),
        },
    )
}

fn page(status: StatusCode, view: &PageView<'_>) -> Response {
    match render_page(view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "page rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.user_message()).into_response()
        }
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "configured": state.is_configured(),
        })),
    )
}
