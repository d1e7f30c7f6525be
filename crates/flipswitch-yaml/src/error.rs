//! Error types for manifest parsing.

use flipswitch_core::ColorParseError;
use thiserror::Error;

/// Error type for manifest parsing and validation.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Two switches share an id
    #[error("Duplicate switch id: {0}")]
    DuplicateId(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// Color string did not parse
    #[error("Invalid color for '{field}': {source}")]
    Color {
        /// Field name
        field: String,
        /// Underlying parse failure
        #[source]
        source: ColorParseError,
    },
}

impl ParseError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::DuplicateId("traffic".to_string());
        assert_eq!(err.to_string(), "Duplicate switch id: traffic");

        let err = ParseError::invalid("traffic.width", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'traffic.width': must be positive"
        );

        let err = ParseError::Color {
            field: "traffic.colors.on".to_string(),
            source: ColorParseError::InvalidLength,
        };
        assert_eq!(
            err.to_string(),
            "Invalid color for 'traffic.colors.on': invalid hex string length (expected 6 or 8)"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_parse_error_from_yaml() {
        let yaml_err = serde_yaml_ng::from_str::<Vec<u32>>("{ not: [a list").unwrap_err();
        let err: ParseError = yaml_err.into();
        assert!(matches!(err, ParseError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML error"));
    }
}
