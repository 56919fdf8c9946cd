//! Domain layer - registry, cascading enablement and resolved features

pub mod namespace;
pub mod registry;
pub mod resolved;
pub mod store;
pub mod validation;

pub use namespace::{parent_namespace, qualified_key};
pub use registry::Registry;
pub use resolved::ResolvedFeature;
pub use store::{KeyValueStore, StoreEntry, StoreError};
