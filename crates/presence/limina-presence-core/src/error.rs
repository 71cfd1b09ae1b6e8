//! Error types for the presence scheduler

use serde::{Deserialize, Serialize};

/// Error type for the options-document surface. The scheduler's own
/// operations are total and never produce one of these; only parsing an
/// externally supplied JSON document can fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PresenceError {
    /// Options document is structurally unusable
    #[error("Invalid options: {reason}")]
    InvalidOptions { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl PresenceError {
    /// Create a new invalid-options error
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        Self::InvalidOptions {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidOptions { .. } => "validation",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for PresenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = PresenceError::invalid_options("bad document");
        assert!(matches!(error, PresenceError::InvalidOptions { .. }));
        assert_eq!(error.category(), "validation");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = PresenceError::from(parse_err);
        assert_eq!(error.category(), "serialization");
    }

    #[test]
    fn test_serialization() {
        let error = PresenceError::invalid_options("test");
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: PresenceError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
