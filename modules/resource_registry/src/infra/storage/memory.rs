//! In-memory key/value store

use crate::domain::store::{KeyValueStore, StoreEntry, StoreError};
use indexmap::IndexMap;

/// Insertion ordered in-memory store
///
/// Not synchronized on its own; the registry guards it with its lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: IndexMap<String, StoreEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn register(&mut self, key: String, entry: StoreEntry) -> Result<(), StoreError> {
        if self.entries.contains_key(&key) {
            return Err(StoreError::KeyExists(key));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    fn resolve(&self, key: &str) -> Result<&StoreEntry, StoreError> {
        self.entries
            .get(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &StoreEntry)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, entry)| (key.as_str(), entry)),
        )
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
