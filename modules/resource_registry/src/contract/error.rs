//! Contract error types for the resource registry

/// Resource registry errors
///
/// Every variant is a programming-error class failure raised synchronously
/// to the caller; none of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Value handed to registration does not have the shape of a feature
    #[error("Invalid feature: {reason}")]
    InvalidFeatureType {
        /// What is wrong with the value
        reason: String,
    },

    /// Qualified key (or bare key) is already registered
    #[error("Feature already registered: {key}")]
    DuplicateFeature {
        /// Conflicting key
        key: String,
    },

    /// No feature registered under the bare key
    #[error("Feature not found: {key}")]
    FeatureNotFound {
        /// Requested bare key
        key: String,
    },

    /// Attribute name outside the configuration schema
    #[error("Configuration attribute not found: {attribute}")]
    ConfigurationAttributeNotFound {
        /// Requested attribute name
        attribute: String,
    },

    /// Feature item is missing or is a plain value
    #[error("Feature item is not invocable: {key}")]
    ItemNotInvocable {
        /// Bare key of the feature
        key: String,
    },
}

impl RegistryError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidFeatureType {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(key: impl Into<String>) -> Self {
        Self::FeatureNotFound { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = RegistryError::DuplicateFeature {
            key: "vessel.boat".to_string(),
        };
        assert_eq!(err.to_string(), "Feature already registered: vessel.boat");

        let err = RegistryError::not_found("trawler");
        assert_eq!(err.to_string(), "Feature not found: trawler");

        let err = RegistryError::invalid("key cannot be empty");
        assert_eq!(err.to_string(), "Invalid feature: key cannot be empty");
    }
}
