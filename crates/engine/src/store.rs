//! Object store: key -> full record, used to hydrate search results

use nearby_core::Key;
use serde_json::Value;
use std::collections::HashMap;

/// Read-only record lookup
///
/// The store may lag behind the indexes; a key with no record is dropped
/// from results rather than treated as an error.
pub trait ObjectStore: Send + Sync {
    /// Record for `key`, if present
    fn get(&self, key: &str) -> Option<Value>;

    /// Number of stored records
    fn len(&self) -> usize;

    /// Whether the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store built during ingestion
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<Key, Value>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record, returning the previous one
    pub fn insert(&mut self, key: impl Into<Key>, record: Value) -> Option<Value> {
        self.records.insert(key.into(), record)
    }

    /// Remove a record
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.records.remove(key)
    }

    /// Whether `key` has a record
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.records.get(key).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

impl FromIterator<(Key, Value)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        MemoryStore {
            records: iter.into_iter().collect(),
        }
    }
}
