//! Telemetry and tracing utilities
//!
//! Initializes the global `tracing` subscriber for the binary.
//!
//! ## Example
//!
//! ```rust,ignore
//! use artifact_lens::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::EnvSource;
use crate::error::{ArtifactError, Result};

/// Env var selecting the log level
pub const LOG_LEVEL_VAR: &str = "ARTIFACT_LENS_LOG_LEVEL";
/// Env var selecting the output format
pub const LOG_FORMAT_VAR: &str = "ARTIFACT_LENS_LOG_FORMAT";
/// Env var selecting a log file
pub const LOG_FILE_VAR: &str = "ARTIFACT_LENS_LOG_FILE";

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format
    Json,
    /// Compact JSON format
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(ArtifactError::Configuration(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Log level
    pub log_level: tracing::Level,
    /// Output format
    pub output_format: OutputFormat,
    /// Log file path; logs go to stdout when unset
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    /// Create a new builder for SubscriberConfig
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Read the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Fails on an unknown level or format.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(level) = lookup(LOG_LEVEL_VAR) {
            builder = builder.log_level_str(&level)?;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            builder = builder.output_format(format.parse()?);
        }
        if let Some(path) = lookup(LOG_FILE_VAR).filter(|p| !p.trim().is_empty()) {
            builder = builder.log_file(PathBuf::from(path));
        }
        Ok(builder.build())
    }

    fn filter_directive(&self) -> String {
        let level = match self.log_level {
            tracing::Level::TRACE => "trace",
            tracing::Level::DEBUG => "debug",
            tracing::Level::INFO => "info",
            tracing::Level::WARN => "warn",
            tracing::Level::ERROR => "error",
        };
        format!("artifact_lens={level},warn")
    }
}

/// Builder for SubscriberConfig
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    /// Set the log level
    pub const fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string
    ///
    /// # Errors
    ///
    /// Fails on anything other than trace, debug, info, warn or error.
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = match level.trim().to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => {
                return Err(ArtifactError::Configuration(format!(
                    "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                )));
            }
        };
        self.log_level = Some(level);
        Ok(self)
    }

    /// Set the output format
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Set the log file path
    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            log_file: self.log_file,
        }
    }
}

/// Initialize tracing subscriber with the given configuration
///
/// Returns a guard when logging to a file; keep it alive for the lifetime of
/// the process or buffered lines are lost. Initializing twice is not an error.
///
/// # Errors
///
/// Fails when the log file's directory cannot be used.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    match &config.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let file_name = path.file_name().ok_or_else(|| {
                ArtifactError::Configuration(format!("{} is not a file path", path.display()))
            })?;
            std::fs::create_dir_all(&dir).map_err(|e| {
                ArtifactError::Configuration(format!("{}: {e}", dir.display()))
            })?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            try_init(config.output_format, filter, writer, false)?;
            Ok(Some(guard))
        }
        None => {
            try_init(config.output_format, filter, std::io::stdout, true)?;
            Ok(None)
        }
    }
}

/// Initialize tracing from the `ARTIFACT_LENS_LOG_*` variables of `source`
///
/// # Errors
///
/// Fails on an invalid level, format or file path.
pub fn init_from_source(source: &EnvSource) -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::from_lookup(|key| source.get(key))?)
}

fn try_init<W>(format: OutputFormat, filter: EnvFilter, writer: W, ansi: bool) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true);

    let init_result = match format {
        OutputFormat::Json => builder.json().try_init(),
        OutputFormat::JsonCompact => builder.json().flatten_event(true).try_init(),
        OutputFormat::Text => builder.with_ansi(ansi).try_init(),
    };

    // Already initialized (tests, embedding) is fine
    if let Err(e) = init_result {
        tracing::debug!(error = %e, "tracing subscriber already set");
    }
    Ok(())
}
