//! Client configuration

use std::path::PathBuf;

/// Default order/payment/catalog API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Default auth service base URL (login)
pub const DEFAULT_AUTH_URL: &str = "https://api.blog.bfinit.com/api/v1";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default session directory
pub const DEFAULT_SESSION_DIR: &str = ".bfinit";

/// Client configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BFINIT_BASE_URL | http://localhost:8080 | order/payment/catalog API |
/// | BFINIT_AUTH_URL | https://api.blog.bfinit.com/api/v1 | login service |
/// | BFINIT_TIMEOUT_SECS | 30 | per-request timeout |
/// | BFINIT_SESSION_DIR | .bfinit | where the session token is kept |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.example.com/api/v1")
    pub base_url: String,

    /// Auth service base URL
    pub auth_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the session file; `None` keeps the session in memory
    pub session_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a configuration for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            session_dir: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BFINIT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            auth_url: std::env::var("BFINIT_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
            timeout: std::env::var("BFINIT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            session_dir: Some(
                std::env::var("BFINIT_SESSION_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_DIR)),
            ),
        }
    }

    /// Set the auth service URL
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the session under this directory
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
