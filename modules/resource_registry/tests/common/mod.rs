//! Common test utilities and shared fleet namespace tree

#![allow(dead_code)]

use resource_registry::{Feature, Item, Meta, Registry};
use serde_json::json;

/// Enable flags for the three structural levels of the fleet tree
#[derive(Debug, Clone, Copy)]
pub struct FleetFlags {
    pub vessel: bool,
    pub boat: bool,
    pub sail: bool,
}

impl Default for FleetFlags {
    fn default() -> Self {
        Self {
            vessel: true,
            boat: true,
            sail: true,
        }
    }
}

/// Fleet tree used across tests
///
/// ```text
/// vessel
/// ├─ boat                (vessel.boat)
/// │  ├─ ski              (vessel.boat.ski)
/// │  ├─ trawler          (vessel.boat.trawler)
/// │  └─ sail  [unregistered at this path]
/// │     ├─ sloop         (vessel.boat.sail.sloop)
/// │     ├─ ketch         (vessel.boat.sail.ketch)
/// │     └─ yawl          (vessel.boat.sail.yawl)
/// └─ sail                (vessel.sail)
/// ```
pub struct Fleet;

impl Fleet {
    pub const BOAT_NS: [&'static str; 2] = ["vessel", "boat"];
    pub const SAIL_NS: [&'static str; 3] = ["vessel", "boat", "sail"];
    pub const BOAT_FEATURES: [&'static str; 2] = ["ski", "trawler"];
    pub const SAIL_FEATURES: [&'static str; 3] = ["sloop", "ketch", "yawl"];

    /// Register the whole fleet tree with the given level flags
    pub fn register(registry: &Registry, flags: FleetFlags) {
        let features = [
            Feature::new("vessel").enabled(flags.vessel),
            Feature::new("boat").namespace(["vessel"]).enabled(flags.boat),
            Feature::new("sail").namespace(["vessel"]).enabled(flags.sail),
            Feature::new("ski").namespace(Self::BOAT_NS).enabled(true),
            Feature::new("trawler").namespace(Self::BOAT_NS).enabled(true),
            Feature::new("sloop").namespace(Self::SAIL_NS).enabled(true),
            Feature::new("ketch").namespace(Self::SAIL_NS).enabled(true),
            Feature::new("yawl").namespace(Self::SAIL_NS).enabled(true),
        ];

        for feature in features {
            registry
                .register_feature(feature)
                .expect("fleet feature registers");
        }
    }

    pub fn registry(flags: FleetFlags) -> Registry {
        let registry = Registry::new();
        Self::register(&registry, flags);
        registry
    }
}

/// Feature whose item greets the argument it is invoked with
pub fn greeter_feature(key: &str, is_enabled: bool) -> Feature {
    Feature::new(key)
        .namespace(["level_1", "level_2", "level_3"])
        .enabled(is_enabled)
        .item(Item::callable(|params| {
            json!(format!("Hello {}", params.as_str().unwrap_or_default()))
        }))
        .meta(Meta {
            label: Some("Name of this UI Feature".to_string()),
            r#type: Some("integer".to_string()),
            default: Some(json!(42)),
            value: Some(json!(57)),
            description: Some("The Answer to Life, the Universe and Everything".to_string()),
            ..Meta::default()
        })
}

/// Bare keys of a list of features
pub fn keys_of(features: &[std::sync::Arc<Feature>]) -> Vec<String> {
    features.iter().map(|feature| feature.key.clone()).collect()
}
