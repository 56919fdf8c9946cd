//! Resolved feature - a feature bound to its owning registry

use super::registry::Registry;
use crate::contract::{Feature, Item, Meta, RegistryError, Setting};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Lookup-time view of a registered feature
///
/// Created fresh by every lookup. Enablement is always answered by the
/// registry, so it reflects the current state of the feature's ancestors.
#[derive(Clone)]
pub struct ResolvedFeature<'r> {
    feature: Arc<Feature>,
    registry: &'r Registry,
}

impl<'r> ResolvedFeature<'r> {
    pub(crate) fn new(feature: Arc<Feature>, registry: &'r Registry) -> Self {
        Self { feature, registry }
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn key(&self) -> &str {
        &self.feature.key
    }

    pub fn namespace(&self) -> &[String] {
        &self.feature.namespace
    }

    pub fn qualified_key(&self) -> String {
        self.feature.qualified_key()
    }

    pub fn item(&self) -> Option<&Item> {
        self.feature.item.as_ref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.feature.meta.as_ref()
    }

    pub fn settings(&self) -> &[Setting] {
        &self.feature.settings
    }

    /// Setting with the given key, if the feature declares one
    pub fn setting(&self, key: &str) -> Option<&Setting> {
        self.feature.find_setting(key)
    }

    /// Effective enablement, delegated to the owning registry
    pub fn is_enabled(&self) -> bool {
        self.registry
            .feature_enabled(&self.feature.key)
            .unwrap_or(false)
    }

    pub fn is_disabled(&self) -> bool {
        !self.is_enabled()
    }

    /// Invoke the feature's callable item with `arg`
    pub fn invoke(&self, arg: Value) -> Result<Value, RegistryError> {
        self.feature
            .item
            .as_ref()
            .and_then(|item| item.invoke(arg))
            .ok_or_else(|| RegistryError::ItemNotInvocable {
                key: self.feature.key.clone(),
            })
    }

    /// JSON view of the feature; callable items render as `null`
    pub fn to_json(&self) -> Value {
        serde_json::to_value(&*self.feature).unwrap_or(Value::Null)
    }
}

impl PartialEq for ResolvedFeature<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.feature == other.feature
    }
}

impl fmt::Debug for ResolvedFeature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFeature")
            .field("feature", &self.feature)
            .finish_non_exhaustive()
    }
}
