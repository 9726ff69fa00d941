//! Error types for the Now client.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading ignore rules, walking the tree or building a manifest.
///
/// Every variant aborts the build; no partial manifest is ever returned.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory {path:?}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl ManifestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Client-facing errors (HTTP, API responses, configuration, manifest).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("{code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        url: Option<String>,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("No API token configured. Set NOW_TOKEN or pass --token.")]
    NotAuthenticated,

    #[error("I/O error: {0}")]
    Io(String),
}

impl ApiError {
    /// HTTP status returned by the server, or 0 for errors raised locally.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Api { status, .. } => *status,
            _ => 0,
        }
    }

    /// Machine-readable error code. Local errors report `client_error`.
    pub fn code(&self) -> &str {
        match self {
            ApiError::Api { code, .. } => code,
            _ => "client_error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_connect() {
            ApiError::Http(format!("Connection error: {}", err))
        } else if err.is_decode() {
            ApiError::Serialization(format!("Failed to parse response: {}", err))
        } else {
            ApiError::Http(err.to_string())
        }
    }
}
