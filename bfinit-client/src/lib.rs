//! BFINIT Client - HTTP client for the order, payment and catalog API
//!
//! Provides authenticated calls to the remote API and the session
//! (bearer token) that every call reads from.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::{BfinitClient, OrderApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorCategory};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionStorage, TOKEN_KEY};

// Re-export shared types for convenience
pub use shared::ApiEnvelope;
pub use shared::models;
