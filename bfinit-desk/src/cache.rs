//! Per-collection cache entry
//!
//! A collection is fetched on first use and then served from memory until
//! [`CollectionCache::invalidate`] is called. A failed fetch keeps whatever
//! was loaded before.

use chrono::{DateTime, Utc};

use crate::store::{Record, RecordStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    NotFetched,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct CollectionCache<T> {
    state: CacheState,
    records: RecordStore<T>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for CollectionCache<T> {
    fn default() -> Self {
        Self {
            state: CacheState::NotFetched,
            records: RecordStore::default(),
            fetched_at: None,
        }
    }
}

impl<T: Record> CollectionCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    /// Time of the last successful fetch
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Whether activating the collection should fetch it
    pub fn needs_fetch(&self) -> bool {
        matches!(self.state, CacheState::NotFetched | CacheState::Error(_))
    }

    pub fn is_loading(&self) -> bool {
        self.state == CacheState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CacheState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn records(&self) -> &RecordStore<T> {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordStore<T> {
        &mut self.records
    }

    pub fn begin_load(&mut self) {
        self.state = CacheState::Loading;
    }

    /// Replace the collection wholesale
    pub fn load(&mut self, items: Vec<T>) {
        self.records.replace_all(items);
        self.state = CacheState::Ready;
        self.fetched_at = Some(Utc::now());
    }

    /// Record a failed fetch without touching loaded data
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = CacheState::Error(message.into());
    }

    /// Force the next activation to fetch again
    pub fn invalidate(&mut self) {
        self.state = CacheState::NotFetched;
    }
}
