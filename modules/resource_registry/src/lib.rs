//! Resource Registry Module
//!
//! Hierarchical feature registry. Features are registered at a position in a
//! dotted namespace tree, carry their own enable flag, metadata and settings,
//! and are only effectively enabled when every registered ancestor along
//! their namespace path is enabled too.

// Public exports
pub mod contract;
pub use contract::{
    client::FeatureRegistryApi, error::RegistryError, Behavior, Feature, Item, Meta, Setting,
};

pub mod config;
pub use config::{ConfigAttribute, Configuration};

pub mod domain;
pub use domain::{
    parent_namespace, qualified_key, KeyValueStore, Registry, ResolvedFeature, StoreEntry, StoreError,
};

pub mod infra;
pub use infra::storage::MemoryStore;
