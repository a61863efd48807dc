//! Keyed record store
//!
//! Records are addressed by id and kept in server order. Status edits go
//! through [`RecordStore::update`], which hands back the record as it was.

use std::collections::HashMap;
use std::ops::Range;

use shared::models::PaymentOrder;

/// Anything with a stable server id
pub trait Record: Clone {
    fn id(&self) -> &str;
}

impl Record for PaymentOrder {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    order: Vec<String>,
    records: HashMap<String, T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            records: HashMap::new(),
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record. A repeated id keeps its first position and
    /// its last value.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.order.clear();
        self.records.clear();
        for item in items {
            let id = item.id().to_string();
            if self.records.insert(id.clone(), item).is_none() {
                self.order.push(id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Records in server order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Records at the given positions
    pub fn slice(&self, range: Range<usize>) -> Vec<&T> {
        let end = range.end.min(self.order.len());
        let start = range.start.min(end);
        self.order[start..end]
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Apply `patch` to the record with `id`, returning its previous value.
    pub fn update<F>(&mut self, id: &str, patch: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let record = self.records.get_mut(id)?;
        let previous = record.clone();
        patch(record);
        Some(previous)
    }
}
