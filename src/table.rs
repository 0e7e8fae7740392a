//! Table implementation
//!
//! HashMap from record id to `Record`. A table does no locking of its own;
//! inside a `Store` it is only touched while the store guard is held.

use std::collections::HashMap;

use crate::record::Record;

/// A named collection of records keyed by id
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: HashMap<String, Record>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
        }
    }

    /// Store a record under `id`, overwriting any existing one
    ///
    /// Returns the replaced record, if there was one.
    pub fn put(&mut self, id: String, record: Record) -> Option<Record> {
        self.records.insert(id, record)
    }

    /// Get the record stored under `id`
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// Replace the record under `id` only if it already exists
    ///
    /// Returns the previous record, or `None` (and leaves the table
    /// untouched) when `id` is absent.
    pub fn replace(&mut self, id: &str, record: Record) -> Option<Record> {
        self.records
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Remove the record under `id`
    pub fn remove(&mut self, id: &str) -> Option<Record> {
        self.records.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record ids, in unspecified order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}
