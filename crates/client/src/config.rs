//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OUTLAY_API_URL` - Base URL of the expense backend (e.g., `https://api.example.com`)
//!
//! ## Optional
//! - `OUTLAY_TOKEN_PATH` - Where the bearer token is persisted
//!   (default: `$HOME/.config/outlay/token`)
//! - `OUTLAY_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the expense backend.
    pub api_base_url: Url,
    /// Path of the persisted bearer token file.
    pub token_path: PathBuf,
    /// Timeout applied to every backend request.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("OUTLAY_API_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("OUTLAY_API_URL".to_owned(), e.to_string()))?;

        let token_path = resolve_token_path(
            get_optional_env("OUTLAY_TOKEN_PATH"),
            get_optional_env("HOME"),
        )?;

        let timeout_secs = get_env_or_default(
            "OUTLAY_REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("OUTLAY_REQUEST_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            token_path,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Resolve the token file path from an explicit override or the home directory.
fn resolve_token_path(
    explicit: Option<String>,
    home: Option<String>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(path));
    }

    home.map(|h| PathBuf::from(h).join(".config").join("outlay").join("token"))
        .ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "OUTLAY_TOKEN_PATH".to_owned(),
                "not set and HOME is unavailable to derive a default".to_owned(),
            )
        })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_token_path_prefers_explicit() {
        let path = resolve_token_path(Some("/tmp/outlay-token".to_owned()), None).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/outlay-token"));
    }

    #[test]
    fn test_resolve_token_path_derives_from_home() {
        let path = resolve_token_path(None, Some("/home/pat".to_owned())).unwrap();
        assert_eq!(path, PathBuf::from("/home/pat/.config/outlay/token"));
    }

    #[test]
    fn test_resolve_token_path_fails_without_home() {
        assert!(matches!(
            resolve_token_path(None, None),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }
}
