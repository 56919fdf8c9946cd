//! Contract models for the resource registry
//!
//! Features, settings and their metadata are plain value records. They are
//! built by the caller, handed to the registry once and never mutated
//! afterwards.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Invocable behavior attached to a feature or setting
pub type Behavior = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Opaque payload carried by a feature or setting
///
/// Serializes as the wrapped value; a callable serializes as `null`.
/// Deserialization always yields [`Item::Value`].
#[derive(Clone)]
pub enum Item {
    /// Plain data
    Value(Value),
    /// Behavior invoked with a caller supplied argument
    Callable(Behavior),
}

impl Item {
    /// Wrap a closure as a callable item
    pub fn callable<F>(behavior: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(behavior))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Callable(_) => None,
        }
    }

    /// Invoke the behavior; `None` for plain values
    pub fn invoke(&self, arg: Value) -> Option<Value> {
        match self {
            Self::Value(_) => None,
            Self::Callable(behavior) => Some(behavior(arg)),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Callable(_) => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::Value)
    }
}

/// Descriptive metadata of a feature or setting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Meta {
    /// Human readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Type tag (integer, string, date, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enumerated choices
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Value>,
    pub is_required: bool,
    pub is_visible: bool,
}

/// Typed setting scoped to a single feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Setting {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Setting {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            description: None,
            r#type: None,
            default: None,
            value: None,
            item: None,
            meta: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn type_tag(mut self, tag: impl Into<String>) -> Self {
        self.r#type = Some(tag.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn item(mut self, item: impl Into<Item>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Current value, falling back to the declared default
    pub fn effective_value(&self) -> Option<&Value> {
        self.value.as_ref().or(self.default.as_ref())
    }
}

/// A registered capability toggle located at a namespace path
///
/// The pair (`namespace`, `key`) forms the qualified key, e.g. namespace
/// `[vessel, boat]` with key `sailboat` is `vessel.boat.sailboat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    /// Identifier, unique within its namespace
    pub key: String,
    /// Namespace segments, root-most first; empty for root features
    #[serde(default)]
    pub namespace: Vec<String>,
    /// The feature's own flag, independent of its ancestors
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default)]
    pub settings: Vec<Setting>,
}

impl Feature {
    /// Create a disabled root feature
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            namespace: Vec::new(),
            is_enabled: false,
            item: None,
            meta: None,
            settings: Vec::new(),
        }
    }

    pub fn namespace<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespace = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    pub fn item(mut self, item: impl Into<Item>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Dot-joined namespace followed by the key
    pub fn qualified_key(&self) -> String {
        crate::domain::qualified_key(&self.namespace, &self.key)
    }

    /// Dot-joined namespace; empty for root features
    pub fn namespace_path(&self) -> String {
        crate::domain::namespace::join(&self.namespace)
    }

    pub fn find_setting(&self, key: &str) -> Option<&Setting> {
        self.settings.iter().find(|setting| setting.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_sets_fields() {
        let feature = Feature::new("sailboat")
            .namespace(["vessel", "boat"])
            .enabled(true)
            .item(json!(42))
            .setting(Setting::new("mast_count").value(json!(2)));

        assert_eq!(feature.key, "sailboat");
        assert_eq!(feature.namespace, vec!["vessel", "boat"]);
        assert!(feature.is_enabled);
        assert_eq!(feature.item, Some(Item::Value(json!(42))));
        assert_eq!(feature.qualified_key(), "vessel.boat.sailboat");
        assert_eq!(feature.namespace_path(), "vessel.boat");
        assert!(feature.find_setting("mast_count").is_some());
        assert!(feature.find_setting("keel").is_none());
    }

    #[test]
    fn test_callable_item_invocation() {
        let greeter = Item::callable(|params| {
            json!(format!("Hello {}", params.as_str().unwrap_or_default()))
        });

        assert!(greeter.is_callable());
        assert_eq!(greeter.invoke(json!("Dolly")), Some(json!("Hello Dolly")));
        assert_eq!(Item::Value(json!(1)).invoke(json!("Dolly")), None);
    }

    #[test]
    fn test_callable_items_compare_by_identity() {
        let greeter = Item::callable(|params| params);
        let same = greeter.clone();
        let other = Item::callable(|params| params);

        assert_eq!(greeter, same);
        assert_ne!(greeter, other);
        assert_ne!(greeter, Item::Value(Value::Null));
    }

    #[test]
    fn test_feature_deserializes_with_defaults() {
        let feature: Feature = serde_json::from_value(json!({
            "key": "greeter_feature",
            "namespace": ["level_1", "level_2"],
            "meta": {
                "label": "Name of this UI Feature",
                "type": "integer",
                "default": 42,
                "value": 57,
                "enum": [],
                "is_required": false,
                "is_visible": false
            }
        }))
        .unwrap();

        assert!(!feature.is_enabled);
        assert!(feature.item.is_none());
        assert!(feature.settings.is_empty());
        let meta = feature.meta.unwrap();
        assert_eq!(meta.r#type.as_deref(), Some("integer"));
        assert_eq!(meta.default, Some(json!(42)));
    }

    #[test]
    fn test_callable_serializes_as_null() {
        let setting = Setting::new("greeting").item(Item::callable(|params| params));
        let value = serde_json::to_value(&setting).unwrap();
        assert_eq!(value, json!({ "key": "greeting", "item": null }));
    }

    #[test]
    fn test_setting_effective_value_falls_back_to_default() {
        let setting = Setting::new("retries").default_value(json!(3));
        assert_eq!(setting.effective_value(), Some(&json!(3)));

        let setting = setting.value(json!(5));
        assert_eq!(setting.effective_value(), Some(&json!(5)));
    }
}
