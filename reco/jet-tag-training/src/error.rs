//! Error types for jet-tag training.

use thiserror::Error;

/// Errors that can occur while preparing or running jet-tag training.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Invalid trainer configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The tag computer needs an input label that has no configured tag.
    #[error("missing tag-info input tag \"{0}\"")]
    InputTagMissing(String),

    /// A collection requested from the event is not present.
    #[error("product not found in event: {0}")]
    ProductNotFound(String),
}

impl TrainingError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates an input-tag-missing error.
    #[must_use]
    pub fn input_tag_missing(label: impl Into<String>) -> Self {
        Self::InputTagMissing(label.into())
    }

    /// Creates a product-not-found error.
    #[must_use]
    pub fn product_not_found(tag: impl Into<String>) -> Self {
        Self::ProductNotFound(tag.into())
    }
}

impl From<serde_json::Error> for TrainingError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for training operations.
pub type Result<T> = std::result::Result<T, TrainingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let err = TrainingError::invalid_config("eta window inverted");
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("eta window"));
    }

    #[test]
    fn error_input_tag_missing() {
        let err = TrainingError::input_tag_missing("svTagInfos");
        assert_eq!(err.to_string(), "missing tag-info input tag \"svTagInfos\"");
    }

    #[test]
    fn error_product_not_found() {
        let err = TrainingError::product_not_found("jetFlavour");
        assert!(err.to_string().contains("jetFlavour"));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<bool>("{").unwrap_err();
        let err: TrainingError = json_err.into();
        assert!(matches!(err, TrainingError::InvalidConfig(_)));
    }
}
