//! Error types for the e2e fixtures
//!
//! Remote failures keep the underlying SDK error as their source so callers
//! see exactly what IAM returned. The variant's own message does not repeat
//! it; walk the source chain to render the details.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error from an external service client
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the e2e fixtures
#[derive(Debug, Error)]
pub enum Error {
    /// The IAM lookup for a role failed (missing role, denied, or transient)
    #[error("failed to look up IAM role {role}")]
    RoleLookup {
        /// Role name that was requested
        role: String,
        /// The error returned by the directory client
        #[source]
        source: BoxError,
    },

    /// The directory answered but the response carried no ARN
    #[error("IAM role {role} returned no ARN")]
    MissingArn {
        /// Role name that was requested
        role: String,
    },

    /// A role tag outside the registered set
    #[error("unknown multi-tenancy role tag: {tag}")]
    UnknownRole {
        /// The rejected tag
        tag: String,
    },

    /// Invalid command-line settings
    #[error("invalid settings: {message}")]
    Settings {
        /// Description of what's invalid
        message: String,
        /// Offending path, if the problem is a missing file
        path: Option<PathBuf>,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a settings error with the given message
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings {
            message: msg.into(),
            path: None,
        }
    }

    /// Create a settings error about a path that does not exist
    pub fn missing_path(flag: &str, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::Settings {
            message: format!("--{} points to {} which does not exist", flag, path.display()),
            path: Some(path),
        }
    }

    /// Create a role lookup error wrapping the directory client's error
    pub fn role_lookup(role: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::RoleLookup {
            role: role.into(),
            source: source.into(),
        }
    }

    /// Role name involved in the error, if any
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::RoleLookup { role, .. } | Self::MissingArn { role } => Some(role),
            _ => None,
        }
    }
}
