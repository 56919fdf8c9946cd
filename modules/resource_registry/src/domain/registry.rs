//! Feature registry - namespace indexed storage and cascading enablement

use super::namespace;
use super::resolved::ResolvedFeature;
use super::store::{KeyValueStore, StoreEntry, StoreError};
use super::validation::{feature_from_value, validate_feature, INDEX_BUCKET};
use crate::config::{ConfigAttribute, Configuration};
use crate::contract::{Feature, FeatureRegistryApi, Item, Meta, RegistryError};
use crate::infra::storage::MemoryStore;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Store key of the bare-key index entry for `key`
fn index_key(key: &str) -> String {
    format!("{}{}{}", INDEX_BUCKET, namespace::SEPARATOR, key)
}

/// Store plus the namespace index, guarded together
struct Indices {
    store: Box<dyn KeyValueStore>,
    /// Namespace path -> qualified keys registered exactly there
    namespaces: IndexMap<String, Vec<String>>,
    /// Qualified key -> meta, filled only while `register_meta` is set
    metas: IndexMap<String, Arc<Meta>>,
}

impl Indices {
    fn qualified_key(&self, key: &str) -> Option<&str> {
        self.store
            .resolve(&index_key(key))
            .ok()
            .and_then(StoreEntry::as_index)
    }

    fn feature_at(&self, qualified_key: &str) -> Option<&Arc<Feature>> {
        self.store
            .resolve(qualified_key)
            .ok()
            .and_then(StoreEntry::as_feature)
    }

    fn feature(&self, key: &str) -> Result<Arc<Feature>, RegistryError> {
        self.qualified_key(key)
            .and_then(|qualified| self.feature_at(qualified))
            .cloned()
            .ok_or_else(|| RegistryError::not_found(key))
    }
}

/// Hierarchical feature registry
///
/// Registration takes a write lock; every query shares a read lock, so a
/// registry behind an `Arc` can serve many readers concurrently.
pub struct Registry {
    indices: RwLock<Indices>,
    config: RwLock<Configuration>,
}

impl Registry {
    /// Create an empty registry backed by an in-memory store
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Create an empty registry backed by the given store
    pub fn with_store(store: impl KeyValueStore + 'static) -> Self {
        Self {
            indices: RwLock::new(Indices {
                store: Box::new(store),
                namespaces: IndexMap::new(),
                metas: IndexMap::new(),
            }),
            config: RwLock::new(Configuration::default()),
        }
    }

    /// Seed the registry with a prepared configuration
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        *self.config.get_mut() = config;
        self
    }

    // ===== Registration =====

    /// Register a feature under its qualified key
    ///
    /// Returns every key of the backing store after registration. Nothing is
    /// stored when the qualified key or the bare key is already taken.
    pub fn register_feature(&self, feature: Feature) -> Result<Vec<String>, RegistryError> {
        if let Err(e) = validate_feature(&feature) {
            tracing::warn!(key = %feature.key, error = %e, "Rejected invalid feature");
            return Err(e);
        }

        let register_meta = self.config.read().register_meta;
        let qualified = feature.qualified_key();
        let namespace_path = feature.namespace_path();
        let bare_key = feature.key.clone();
        let meta = feature.meta.clone().filter(|_| register_meta);
        let feature = Arc::new(feature);

        let mut indices = self.indices.write();

        let conflict = if indices.store.contains(&qualified) {
            Some(qualified.clone())
        } else if indices.store.contains(&index_key(&bare_key)) {
            Some(bare_key.clone())
        } else {
            None
        };
        if let Some(key) = conflict {
            tracing::warn!(key = %key, qualified_key = %qualified, "Rejected duplicate feature");
            return Err(RegistryError::DuplicateFeature { key });
        }

        indices
            .store
            .register(qualified.clone(), StoreEntry::Feature(feature))?;
        indices
            .store
            .register(index_key(&bare_key), StoreEntry::Index(qualified.clone()))?;
        if let Some(meta) = meta {
            indices.metas.insert(qualified.clone(), Arc::new(meta));
        }
        indices
            .namespaces
            .entry(namespace_path)
            .or_default()
            .push(qualified.clone());

        tracing::debug!(key = %bare_key, qualified_key = %qualified, "Registered feature");
        Ok(indices.store.keys())
    }

    /// Register a feature from an untyped value
    ///
    /// Fails with `InvalidFeatureType` unless the value has the feature shape.
    pub fn register_feature_value(&self, value: Value) -> Result<Vec<String>, RegistryError> {
        let feature = match feature_from_value(value) {
            Ok(feature) => feature,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected value that is not a feature");
                return Err(e);
            }
        };
        self.register_feature(feature)
    }

    // ===== Items =====

    /// Register an arbitrary item directly under `key`
    ///
    /// Items share the store with features, so a key taken by either fails
    /// with [`StoreError::KeyExists`].
    pub fn register(&self, key: impl Into<String>, item: impl Into<Item>) -> Result<(), StoreError> {
        let key = key.into();
        self.indices
            .write()
            .store
            .register(key.clone(), StoreEntry::Item(item.into()))?;
        tracing::debug!(key = %key, "Registered item");
        Ok(())
    }

    /// Resolve whatever entry is stored under `key`
    pub fn resolve(&self, key: &str) -> Result<StoreEntry, StoreError> {
        self.indices.read().store.resolve(key).cloned()
    }

    // ===== Lookup =====

    /// Resolve a feature by its bare key
    pub fn resolve_feature(&self, key: &str) -> Result<ResolvedFeature<'_>, RegistryError> {
        let feature = self.indices.read().feature(key)?;
        Ok(ResolvedFeature::new(feature, self))
    }

    /// Shortcut for [`Registry::resolve_feature`]
    pub fn get(&self, key: &str) -> Result<ResolvedFeature<'_>, RegistryError> {
        self.resolve_feature(key)
    }

    /// Resolve a feature and invoke its callable item with `arg`
    pub fn resolve_and_invoke(&self, key: &str, arg: Value) -> Result<Value, RegistryError> {
        self.resolve_feature(key)?.invoke(arg)
    }

    pub fn has_feature(&self, key: &str) -> bool {
        self.indices.read().qualified_key(key).is_some()
    }

    /// Bare keys of every registered feature, in registration order
    pub fn features(&self) -> Vec<String> {
        let prefix = index_key("");
        self.indices
            .read()
            .store
            .entries()
            .filter(|(_, entry)| matches!(entry, StoreEntry::Index(_)))
            .filter_map(|(key, _)| key.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// Features registered exactly at `namespace_path`, in registration order
    ///
    /// Features nested deeper are not included; `""` addresses the root.
    pub fn features_by_namespace(&self, namespace_path: &str) -> Vec<Arc<Feature>> {
        let indices = self.indices.read();
        indices
            .namespaces
            .get(namespace_path)
            .map(|qualified_keys| {
                qualified_keys
                    .iter()
                    .filter_map(|qualified| indices.feature_at(qualified).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Namespace paths holding at least one feature, in first-use order
    pub fn namespaces(&self) -> Vec<String> {
        self.indices.read().namespaces.keys().cloned().collect()
    }

    /// Every key in the backing store
    pub fn keys(&self) -> Vec<String> {
        self.indices.read().store.keys()
    }

    /// Metadata stored alongside the feature when `register_meta` was set
    pub fn registered_meta(&self, key: &str) -> Option<Arc<Meta>> {
        let indices = self.indices.read();
        let qualified = indices.qualified_key(key)?;
        indices.metas.get(qualified).cloned()
    }

    /// Number of registered features
    pub fn len(&self) -> usize {
        self.indices
            .read()
            .namespaces
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ===== Cascading enablement =====

    /// Whether a feature is effectively enabled
    ///
    /// A feature is enabled when its own flag is set and every feature
    /// registered at a prefix of its namespace has its own flag set.
    /// Prefixes without a registered feature are skipped.
    pub fn feature_enabled(&self, key: &str) -> Result<bool, RegistryError> {
        let indices = self.indices.read();
        let feature = indices.feature(key)?;

        if !feature.is_enabled {
            return Ok(false);
        }

        for path in namespace::ancestor_paths(&feature.namespace) {
            if let Some(ancestor) = indices.feature_at(&path) {
                if !ancestor.is_enabled {
                    tracing::trace!(key = %key, ancestor = %path, "Feature disabled by ancestor");
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Qualified key with its final segment removed
    pub fn parent_namespace(qualified_key: &str) -> &str {
        namespace::parent_namespace(qualified_key)
    }

    // ===== Configuration =====

    /// Apply `mutator` to a copy of the configuration and store the result
    ///
    /// The write lock is held throughout, so concurrent calls never lose an
    /// update.
    pub fn configure<F>(&self, mutator: F)
    where
        F: FnOnce(&mut Configuration),
    {
        let mut config = self.config.write();
        let mut next = config.clone();
        mutator(&mut next);
        tracing::debug!(name = ?next.name, register_meta = next.register_meta, "Registry configured");
        *config = next;
    }

    /// Snapshot of the configuration record
    pub fn config(&self) -> Configuration {
        self.config.read().clone()
    }

    /// Every configuration attribute that has a value
    pub fn configurations(&self) -> Map<String, Value> {
        self.config.read().to_map()
    }

    /// Value of one configuration attribute; `null` when unset
    pub fn configuration(&self, attribute: &str) -> Result<Value, RegistryError> {
        let attribute: ConfigAttribute = attribute.parse()?;
        Ok(self.config.read().get(attribute).unwrap_or(Value::Null))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("features", &self.features())
            .field("config", &*self.config.read())
            .finish()
    }
}

impl FeatureRegistryApi for Registry {
    fn resolve_feature(&self, key: &str) -> Result<ResolvedFeature<'_>, RegistryError> {
        Registry::resolve_feature(self, key)
    }

    fn resolve_and_invoke(&self, key: &str, arg: Value) -> Result<Value, RegistryError> {
        Registry::resolve_and_invoke(self, key, arg)
    }

    fn has_feature(&self, key: &str) -> bool {
        Registry::has_feature(self, key)
    }

    fn features(&self) -> Vec<String> {
        Registry::features(self)
    }

    fn feature_enabled(&self, key: &str) -> Result<bool, RegistryError> {
        Registry::feature_enabled(self, key)
    }

    fn features_by_namespace(&self, namespace_path: &str) -> Vec<Arc<Feature>> {
        Registry::features_by_namespace(self, namespace_path)
    }
}
