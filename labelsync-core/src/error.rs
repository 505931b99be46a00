//! Error types for labelsync-core.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// All errors that can arise while loading the label configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read (missing, permission denied, etc.).
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but a label rule is unusable.
    #[error("invalid label \"{label}\" in organization {org}: {reason}")]
    Invalid {
        org: String,
        label: String,
        reason: String,
    },
}

/// Errors reported by a [`crate::LabelApi`] implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The token was rejected.
    #[error("authentication failed (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The rate limit is exhausted until the reset window passes.
    #[error("rate limit exceeded, resets in {reset_in:?}")]
    RateLimited { reset_in: Duration },

    /// Any other non-success response.
    #[error("remote API error: HTTP {status} - {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// A success response whose body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Status { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
