//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-2xx response carrying an API message
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response with `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Login refused by the auth service
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session file error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`ClientError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Request never produced a successful HTTP exchange
    Transport,
    /// Server answered, but refused or failed the operation
    Application,
    /// Rejected locally before any request was sent
    Validation,
    /// Local setup problem (config, session file)
    Local,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Http(_)
            | ClientError::Unauthorized(_)
            | ClientError::Forbidden(_)
            | ClientError::NotFound(_)
            | ClientError::Api { .. }
            | ClientError::Internal(_) => ErrorCategory::Transport,
            ClientError::Rejected(_)
            | ClientError::Auth(_)
            | ClientError::InvalidResponse(_)
            | ClientError::Serialization(_) => ErrorCategory::Application,
            ClientError::Validation(_) => ErrorCategory::Validation,
            ClientError::Config(_) | ClientError::Io(_) => ErrorCategory::Local,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
