//! Application configuration
//!
//! Everything is read once at startup into an [`AppConfig`] value which is
//! then passed by reference to whoever needs it. Values come from an
//! [`EnvSource`]: the process environment, then entries from a local `.env`
//! file. The file is parsed once and never written into the environment.
//!
//! | Variable                       | Default                                              |
//! |--------------------------------|------------------------------------------------------|
//! | `GOOGLE_API_KEY`               | none (feature disabled, banner shown)                |
//! | `ARTIFACT_LENS_BIND`           | `127.0.0.1:8501`                                     |
//! | `ARTIFACT_LENS_MAX_UPLOAD_MB`  | `200`                                                |
//! | `GEMINI_BASE_URL`              | `https://generativelanguage.googleapis.com/v1beta`   |

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ArtifactError, Result};

/// Environment variable holding the model credential.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Environment variable holding the listen address.
pub const BIND_VAR: &str = "ARTIFACT_LENS_BIND";
/// Environment variable holding the upload size limit in MiB.
pub const MAX_UPLOAD_VAR: &str = "ARTIFACT_LENS_MAX_UPLOAD_MB";
/// Environment variable overriding the Gemini REST base URL.
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

/// Dotenv file read from the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";
/// Default upload size limit in MiB.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 200;

/// Whether a model credential was found at startup.
#[derive(Clone)]
pub enum CredentialStatus {
    /// A non-empty credential is available
    Present(SecretString),
    /// No credential; the model client must not be invoked
    Missing,
}

impl CredentialStatus {
    /// Whether the credential is present
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The credential, if present
    pub const fn secret(&self) -> Option<&SecretString> {
        match self {
            Self::Present(secret) => Some(secret),
            Self::Missing => None,
        }
    }
}

impl std::fmt::Debug for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present(_) => f.write_str("Present([REDACTED])"),
            Self::Missing => f.write_str("Missing"),
        }
    }
}

/// Startup configuration for the whole app.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Model credential
    pub credential: CredentialStatus,
    /// Listen address for the web form
    pub bind: SocketAddr,
    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,
    /// Override for the Gemini base URL
    pub gemini_base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credential: CredentialStatus::Missing,
            bind: SocketAddr::from(([127, 0, 0, 1], 8501)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            gemini_base_url: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment and `./.env`.
    ///
    /// A missing credential is not an error; it yields [`CredentialStatus::Missing`].
    ///
    /// # Errors
    ///
    /// Fails on an unparsable `.env` file or malformed values such as a bad
    /// bind address.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&EnvSource::load(Path::new(DOTENV_FILE))?)
    }

    /// Build configuration from an already loaded [`EnvSource`].
    ///
    /// # Errors
    ///
    /// Fails on malformed values such as an unparsable bind address.
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        Self::from_lookup(|key| source.get(key))
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Fails on malformed values such as an unparsable bind address.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = match lookup(API_KEY_VAR) {
            Some(key) if !key.trim().is_empty() => {
                CredentialStatus::Present(SecretString::from(key.trim().to_string()))
            }
            _ => CredentialStatus::Missing,
        };

        let bind_raw = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.trim().parse::<SocketAddr>().map_err(|e| {
            ArtifactError::Configuration(format!("{BIND_VAR}={bind_raw} is not a socket address: {e}"))
        })?;

        let max_upload_mb = match lookup(MAX_UPLOAD_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ArtifactError::Configuration(format!("{MAX_UPLOAD_VAR}={raw} is not a number: {e}"))
            })?,
            None => DEFAULT_MAX_UPLOAD_MB,
        };
        if max_upload_mb == 0 {
            return Err(ArtifactError::Configuration(format!(
                "{MAX_UPLOAD_VAR} must be greater than zero"
            )));
        }

        let gemini_base_url = lookup(BASE_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            credential,
            bind,
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            gemini_base_url,
        })
    }

    /// Use the given credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.credential = CredentialStatus::Present(SecretString::from(api_key.into()));
        self
    }

    /// Point the model client at a different base URL
    pub fn with_gemini_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gemini_base_url = Some(base_url.into());
        self
    }

    /// Whether the model client may be built
    pub const fn is_configured(&self) -> bool {
        self.credential.is_present()
    }

    /// The credential as plain text, for building request headers
    pub fn api_key(&self) -> Option<&str> {
        self.credential.secret().map(|s| s.expose_secret())
    }
}

/// Process environment layered over the entries of a dotenv file.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file_vars: HashMap<String, String>,
}

impl EnvSource {
    /// Read the dotenv file at `path`; a missing file leaves only the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let file_vars = read_dotenv(path)?;
        tracing::debug!(path = %path.display(), entries = file_vars.len(), "loaded dotenv file");
        Ok(Self::from_file_vars(file_vars))
    }

    /// Layer the given entries under the process environment
    pub fn from_file_vars(file_vars: HashMap<String, String>) -> Self {
        Self { file_vars }
    }

    /// Look up `key`, preferring the process environment
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.file_vars.get(key).cloned())
    }
}

/// Read `KEY=value` pairs from a dotenv file without touching the process environment.
///
/// A missing file yields an empty map.
///
/// # Errors
///
/// Fails when the file exists but cannot be parsed.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| ArtifactError::Configuration(format!("{}: {e}", path.display())))?;
    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) =
            item.map_err(|e| ArtifactError::Configuration(format!("{}: {e}", path.display())))?;
        vars.insert(key, value);
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_variables() {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert!(!cfg.is_configured());
        assert_eq!(cfg.bind.to_string(), DEFAULT_BIND);
        assert_eq!(cfg.max_upload_bytes, 200 * 1024 * 1024);
        assert!(cfg.gemini_base_url.is_none());
    }

    #[test]
    fn credential_is_trimmed_and_blank_counts_as_missing() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  k-123 ")])).unwrap();
        assert_eq!(cfg.api_key(), Some("k-123"));

        let cfg = AppConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")])).unwrap();
        assert!(!cfg.is_configured());
    }

    #[test]
    fn malformed_values_are_configuration_errors() {
        let err = AppConfig::from_lookup(lookup_from(&[(BIND_VAR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ArtifactError::Configuration(_)));

        let err = AppConfig::from_lookup(lookup_from(&[(MAX_UPLOAD_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ArtifactError::Configuration(_)));

        let err = AppConfig::from_lookup(lookup_from(&[(MAX_UPLOAD_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ArtifactError::Configuration(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let cfg =
            AppConfig::from_lookup(lookup_from(&[(BASE_URL_VAR, "http://localhost:9000/v1beta/")]))
                .unwrap();
        assert_eq!(cfg.gemini_base_url.as_deref(), Some("http://localhost:9000/v1beta"));
    }

    #[test]
    fn debug_never_prints_the_secret() {
        let cfg = AppConfig::default().with_api_key("super-secret");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("REDACTED"));
    }

    #[test]
    fn dotenv_file_is_read_without_mutating_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# local credentials").unwrap();
        writeln!(file, "{API_KEY_VAR}=from-file").unwrap();
        writeln!(file, "{MAX_UPLOAD_VAR}=5").unwrap();
        drop(file);

        let vars = read_dotenv(&path).unwrap();
        let cfg = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(cfg.api_key(), Some("from-file"));
        assert_eq!(cfg.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn process_environment_wins_over_dotenv_entries() {
        let source = EnvSource::from_file_vars(HashMap::from([
            ("PATH".to_string(), "from-file".to_string()),
            ("ARTIFACT_LENS_TEST_ONLY_IN_FILE".to_string(), "file".to_string()),
        ]));
        assert_ne!(source.get("PATH").as_deref(), Some("from-file"));
        assert_eq!(
            source.get("ARTIFACT_LENS_TEST_ONLY_IN_FILE").as_deref(),
            Some("file")
        );
    }

    #[test]
    fn malformed_dotenv_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOT A VALID LINE\n").unwrap();

        let err = EnvSource::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Configuration(_)));
    }

    #[test]
    fn missing_dotenv_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_dotenv(&dir.path().join(".env")).unwrap();
        assert!(vars.is_empty());
    }
}
