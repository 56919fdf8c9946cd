//! Configuration for a registry instance

use crate::contract::RegistryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Registry name
    pub name: Option<String>,

    /// Application root directory
    pub root: Option<PathBuf>,

    /// Location feature definitions are loaded from
    pub load_path: Option<String>,

    /// When the registry was configured
    pub created_at: Option<DateTime<Utc>>,

    /// Also keep each feature's metadata in the registry's meta index
    pub register_meta: bool,
}

impl Configuration {
    /// Value of a single attribute; `None` when it was never set
    pub fn get(&self, attribute: ConfigAttribute) -> Option<Value> {
        match attribute {
            ConfigAttribute::Name => self.name.clone().map(Value::String),
            ConfigAttribute::Root => self
                .root
                .as_ref()
                .map(|root| Value::String(root.to_string_lossy().into_owned())),
            ConfigAttribute::LoadPath => self.load_path.clone().map(Value::String),
            ConfigAttribute::CreatedAt => self
                .created_at
                .map(|created_at| Value::String(created_at.to_rfc3339())),
            ConfigAttribute::RegisterMeta => Some(Value::Bool(self.register_meta)),
        }
    }

    /// Flat view of every attribute that has a value
    pub fn to_map(&self) -> Map<String, Value> {
        ConfigAttribute::ALL
            .iter()
            .filter_map(|attribute| {
                self.get(*attribute)
                    .map(|value| (attribute.as_str().to_string(), value))
            })
            .collect()
    }
}

/// Fixed configuration schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigAttribute {
    Name,
    Root,
    LoadPath,
    CreatedAt,
    RegisterMeta,
}

impl ConfigAttribute {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Root,
        Self::LoadPath,
        Self::CreatedAt,
        Self::RegisterMeta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Root => "root",
            Self::LoadPath => "load_path",
            Self::CreatedAt => "created_at",
            Self::RegisterMeta => "register_meta",
        }
    }
}

impl FromStr for ConfigAttribute {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.as_str() == s)
            .ok_or_else(|| RegistryError::ConfigurationAttributeNotFound {
                attribute: s.to_string(),
            })
    }
}

impl fmt::Display for ConfigAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_configuration_only_exposes_register_meta() {
        let config = Configuration::default();
        let map = config.to_map();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("register_meta"), Some(&json!(false)));
        assert_eq!(config.get(ConfigAttribute::Name), None);
    }

    #[test]
    fn test_attribute_names_round_trip() {
        for attribute in ConfigAttribute::ALL {
            assert_eq!(attribute.as_str().parse::<ConfigAttribute>(), Ok(attribute));
        }
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let result = "not_a_config_attribute".parse::<ConfigAttribute>();
        assert_eq!(
            result,
            Err(RegistryError::ConfigurationAttributeNotFound {
                attribute: "not_a_config_attribute".to_string(),
            })
        );
    }

    #[test]
    fn test_configuration_deserializes_partial_input() {
        let config: Configuration = serde_json::from_value(json!({
            "name": "enroll",
            "load_path": "system/templates"
        }))
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("enroll"));
        assert_eq!(config.load_path.as_deref(), Some("system/templates"));
        assert!(config.root.is_none());
        assert!(!config.register_meta);
    }

    #[test]
    fn test_configuration_rejects_unknown_fields() {
        let result: Result<Configuration, _> =
            serde_json::from_value(json!({ "name": "enroll", "colour": "blue" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_root_renders_as_string() {
        let config = Configuration {
            root: Some(PathBuf::from("./lib")),
            ..Configuration::default()
        };
        assert_eq!(config.get(ConfigAttribute::Root), Some(json!("./lib")));
    }
}
