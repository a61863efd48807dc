//! Auth-related types shared between the client and test servers
//!
//! The auth service answers with its own `{status, data, message}`
//! envelope, distinct from the order API's `success` flag.

use serde::{Deserialize, Serialize};

/// Status value the auth service uses for a successful call
pub const AUTH_STATUS_SUCCESS: &str = "success";

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// Auth service response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEnvelope<T> {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> AuthEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == AUTH_STATUS_SUCCESS
    }
}
