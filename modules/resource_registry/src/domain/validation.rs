//! Shape validation at the registration boundary

use crate::contract::{Feature, RegistryError};
use serde_json::Value;

/// Key reserved for the bare-key index bucket
pub const INDEX_BUCKET: &str = "feature_index";

/// Validate an identifier used as a key or namespace segment
///
/// Identifiers must be non-empty and contain neither the namespace
/// separator nor whitespace.
pub fn validate_identifier(identifier: &str, role: &str) -> Result<(), RegistryError> {
    if identifier.is_empty() {
        return Err(RegistryError::invalid(format!("{} cannot be empty", role)));
    }

    if identifier.contains(super::namespace::SEPARATOR) {
        return Err(RegistryError::invalid(format!(
            "{} '{}' must not contain '{}'",
            role,
            identifier,
            super::namespace::SEPARATOR
        )));
    }

    if identifier.chars().any(char::is_whitespace) {
        return Err(RegistryError::invalid(format!(
            "{} '{}' must not contain whitespace",
            role, identifier
        )));
    }

    Ok(())
}

/// Validate a typed feature before it is registered
pub fn validate_feature(feature: &Feature) -> Result<(), RegistryError> {
    validate_identifier(&feature.key, "feature key")?;

    if feature.key == INDEX_BUCKET {
        return Err(RegistryError::invalid(format!(
            "feature key '{}' is reserved",
            INDEX_BUCKET
        )));
    }

    for segment in &feature.namespace {
        validate_identifier(segment, "namespace segment")?;
    }

    // Index entries live under `feature_index.<key>`
    if feature.namespace.first().is_some_and(|root| root == INDEX_BUCKET) {
        return Err(RegistryError::invalid(format!(
            "namespace '{}' is reserved",
            INDEX_BUCKET
        )));
    }

    for setting in &feature.settings {
        validate_identifier(&setting.key, "setting key")?;
    }

    Ok(())
}

/// Turn an untyped value into a validated feature
pub fn feature_from_value(value: Value) -> Result<Feature, RegistryError> {
    if !value.is_object() {
        return Err(RegistryError::invalid(format!(
            "expected a feature object, got {}",
            value_kind(&value)
        )));
    }

    let feature: Feature = serde_json::from_value(value)
        .map_err(|e| RegistryError::invalid(e.to_string()))?;
    validate_feature(&feature)?;
    Ok(feature)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
