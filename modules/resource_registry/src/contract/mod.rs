//! Contract layer - public API for collaborators of the registry
//!
//! This layer contains the feature entities, the error type and the
//! read-side trait that other components receive by injection.

pub mod client;
pub mod error;
pub mod model;

pub use client::FeatureRegistryApi;
pub use error::RegistryError;
pub use model::{Behavior, Feature, Item, Meta, Setting};
