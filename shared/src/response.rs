//! API Response types
//!
//! Response envelope returned by the order/payment/product API

use serde::{Deserialize, Serialize};

/// Unified API response envelope
///
/// Every collection and mutation endpoint answers with this shape:
/// ```json
/// {
///     "success": true,
///     "message": "Orders retrieved",
///     "data": [ ... ]
/// }
/// ```
///
/// A missing `success` field reads as `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Application-level outcome
    #[serde(default)]
    pub success: bool,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Create a failed response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Message of a failed envelope, or a generic fallback
    pub fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "request was not successful".to_string())
    }
}

/// Acknowledgement without a payload (`{success, message}`)
pub type Ack = ApiEnvelope<serde_json::Value>;
