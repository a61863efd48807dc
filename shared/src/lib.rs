//! Shared types for the BFINIT console
//!
//! Wire DTOs used by both the HTTP client and the order desk:
//! order shapes, payment orders, products, categories, and the
//! `{success, data, message}` response envelope.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::ParseStatusError;
pub use response::ApiEnvelope;
pub use serde::{Deserialize, Serialize};
