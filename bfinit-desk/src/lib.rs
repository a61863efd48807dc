//! BFINIT order desk
//!
//! Client-side order management on top of [`bfinit_client`]:
//!
//! - [`OrderListing`]: two tab-scoped order collections (online and
//!   manual), fetched lazily, paginated and summarized locally
//! - [`RowEditor`]: per-row optimistic status edit with confirm, cancel,
//!   rollback and a terminal locked state
//! - [`PaymentLedger`]: Bitss payment list with the paid-lock editor
//! - [`view`]: table rows as display-ready cells

pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod ledger;
pub mod listing;
pub mod order;
pub mod pagination;
pub mod row;
pub mod stats;
pub mod status;
pub mod store;
pub mod view;

pub use cache::{CacheState, CollectionCache};
pub use config::DeskConfig;
pub use error::{DeskError, DeskResult};
pub use ledger::PaymentLedger;
pub use listing::{OrderListing, Tab};
pub use order::Order;
pub use pagination::{PAGE_SIZES, PageItem, Pagination, page_window};
pub use row::{RowEditor, RowNotice, RowOutcome, RowPhase};
pub use stats::OrderStats;
pub use status::{EditableStatus, OrderStatus, StatusBucket};
pub use store::{Record, RecordStore};
