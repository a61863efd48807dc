//! Desk configuration

use crate::pagination::PAGE_SIZES;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Order desk settings
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BFINIT_PAGE_SIZE | 10 | initial rows per page (5, 10, 25, 50 or 100) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub page_size: usize,
}

impl DeskConfig {
    pub fn from_env() -> Self {
        let page_size = std::env::var("BFINIT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| PAGE_SIZES.contains(n));
        Self {
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
