//! Read-side registry trait for collaborators
//!
//! Components that only query features receive a `&dyn FeatureRegistryApi`
//! (or an `Arc` of one) instead of reaching for shared global state.

use super::{error::RegistryError, model::Feature};
use crate::domain::ResolvedFeature;
use serde_json::Value;
use std::sync::Arc;

/// Query API of a feature registry
pub trait FeatureRegistryApi: Send + Sync {
    /// Resolve a feature by its bare key
    fn resolve_feature(&self, key: &str) -> Result<ResolvedFeature<'_>, RegistryError>;

    /// Resolve a feature and invoke its callable item with `arg`
    fn resolve_and_invoke(&self, key: &str, arg: Value) -> Result<Value, RegistryError>;

    /// Whether a feature with this bare key is registered
    fn has_feature(&self, key: &str) -> bool;

    /// All registered bare keys in registration order
    fn features(&self) -> Vec<String>;

    /// Effective enablement, taking registered ancestors into account
    fn feature_enabled(&self, key: &str) -> Result<bool, RegistryError>;

    /// Features registered exactly at the dot-joined namespace path
    fn features_by_namespace(&self, namespace_path: &str) -> Vec<Arc<Feature>>;
}
