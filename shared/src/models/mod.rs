//! Data models
//!
//! Wire shapes of the order, payment and catalog API.
//! Mongo-style `_id` fields are renamed to `id` on the Rust side.

pub mod category;
pub mod manual_order;
pub mod order;
pub mod payment;
pub mod product;

// Re-exports
pub use category::*;
pub use manual_order::*;
pub use order::*;
pub use payment::*;
pub use product::*;
