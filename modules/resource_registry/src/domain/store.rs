//! Key/value store abstraction backing a registry
//!
//! The registry keeps every record in one string-keyed store. The trait is
//! the seam for alternative containers; the in-memory implementation lives
//! in infra/storage/memory.rs.

use crate::contract::{Feature, Item};
use std::sync::Arc;

/// Error type for store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Key already registered: {0}")]
    KeyExists(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}

/// Record kept under a store key
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEntry {
    /// Feature stored under its qualified key
    Feature(Arc<Feature>),
    /// Bare-key index entry pointing at a qualified key
    Index(String),
    /// Arbitrary item registered directly with the registry
    Item(Item),
}

impl StoreEntry {
    pub fn as_feature(&self) -> Option<&Arc<Feature>> {
        match self {
            Self::Feature(feature) => Some(feature),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&str> {
        match self {
            Self::Index(qualified) => Some(qualified),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }
}

/// String-keyed store with insertion ordered enumeration
pub trait KeyValueStore: Send + Sync {
    /// Register an entry; fails if the key is already present
    fn register(&mut self, key: String, entry: StoreEntry) -> Result<(), StoreError>;

    /// Resolve an entry; fails if the key is absent
    fn resolve(&self, key: &str) -> Result<&StoreEntry, StoreError>;

    /// Check if a key is present
    fn contains(&self, key: &str) -> bool;

    /// All keys in insertion order
    fn keys(&self) -> Vec<String>;

    /// All entries in insertion order
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &StoreEntry)> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<StoreError> for crate::contract::RegistryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::KeyExists(key) => Self::DuplicateFeature { key },
            StoreError::KeyNotFound(key) => Self::FeatureNotFound { key },
        }
    }
}
