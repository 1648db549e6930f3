//! Error types for the Blog Writer client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when the backend rejects a generation without a usable `detail`.
pub const GENERIC_GENERATION_FAILURE: &str = "Generation failed";

/// Message shown when the backend rejects a history fetch without a usable `detail`.
pub const GENERIC_HISTORY_FAILURE: &str = "Failed to load history";

/// A shared error type for the entire Blog Writer client.
///
/// Every variant is recoverable: the UI boundary turns it into a single
/// user-visible message via [`WriterError::user_message`] and stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriterError {
    /// No session, or a session without a bearer token.
    #[error("Sign-in is required")]
    Unauthenticated,

    /// The backend base URL is not configured.
    #[error("API_BASE_URL is not configured")]
    ConfigurationMissing,

    /// The backend answered a generation request with a non-success status.
    #[error("{detail}")]
    BackendRejected { detail: String },

    /// The backend answered a history request with a non-success status.
    #[error("{detail}")]
    HistoryFetchFailed { detail: String },

    /// The identity provider refused a sign-up, sign-in or sign-out.
    #[error("{message}")]
    IdentityProvider { message: String },

    /// The request failed local validation and was not sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request never produced an HTTP response (DNS, connect, timeout, body read).
    #[error("Network error: {message}")]
    Transport { message: String },

    /// Local file storage (config, persisted session) failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },
}

impl WriterError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a BackendRejected error
    pub fn backend_rejected(detail: impl Into<String>) -> Self {
        Self::BackendRejected {
            detail: detail.into(),
        }
    }

    /// Creates a HistoryFetchFailed error
    pub fn history_fetch_failed(detail: impl Into<String>) -> Self {
        Self::HistoryFetchFailed {
            detail: detail.into(),
        }
    }

    /// Creates an IdentityProvider error
    pub fn identity(message: impl Into<String>) -> Self {
        Self::IdentityProvider {
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthenticated error
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a ConfigurationMissing error
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing)
    }

    /// Check if this error came back from the backend as a non-success status.
    pub fn is_backend_rejection(&self) -> bool {
        matches!(
            self,
            Self::BackendRejected { .. } | Self::HistoryFetchFailed { .. }
        )
    }

    /// The single line shown to the user for this error.
    ///
    /// Backend and identity provider messages are surfaced verbatim so that
    /// `{"detail": "quota exceeded"}` reads exactly `quota exceeded`.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for WriterError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for WriterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for WriterError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for WriterError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error at crate seams that still use anyhow.
impl From<anyhow::Error> for WriterError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// A type alias for `Result<T, WriterError>`.
pub type Result<T> = std::result::Result<T, WriterError>;
