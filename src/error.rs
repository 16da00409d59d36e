use thiserror::Error;

use crate::models::RiskLabel;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// Prediction or encoding attempted before a model was trained or loaded
    #[error("model not ready: train or restore a bundle first")]
    ModelNotReady,

    /// Training batch cannot support a stratified split
    #[error("insufficient data: class {label} has {count} example(s), at least 2 required")]
    InsufficientData { label: RiskLabel, count: usize },

    /// No usable features could be constructed from the batch
    #[error("empty feature set: no usable features were constructed")]
    EmptyFeatureSet,

    /// Persisted bundle cannot be loaded against this build
    #[error("incompatible bundle: {0}")]
    IncompatibleBundle(String),

    /// A record is missing a required field or carries a non-numeric value
    /// where a numeric one is expected
    #[error("malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal errors (model fitting or prediction failures)
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            EngineError::ModelNotReady => "MODEL_NOT_READY",
            EngineError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            EngineError::EmptyFeatureSet => "EMPTY_FEATURE_SET",
            EngineError::IncompatibleBundle(_) => "INCOMPATIBLE_BUNDLE",
            EngineError::MalformedRecord { .. } => "MALFORMED_RECORD",
            EngineError::Io(_) => "IO_ERROR",
            EngineError::Serialization(_) => "SERIALIZATION_ERROR",
            EngineError::Configuration(_) => "CONFIGURATION_ERROR",
            EngineError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EngineError::ModelNotReady.error_code(), "MODEL_NOT_READY");
        assert_eq!(
            EngineError::InsufficientData {
                label: RiskLabel::High,
                count: 1
            }
            .error_code(),
            "INSUFFICIENT_DATA"
        );
        assert_eq!(
            EngineError::IncompatibleBundle("version 2".to_string()).error_code(),
            "INCOMPATIBLE_BUNDLE"
        );
        assert_eq!(
            EngineError::MalformedRecord {
                id: "STU-1".to_string(),
                reason: "NaN attendance".to_string()
            }
            .error_code(),
            "MALFORMED_RECORD"
        );
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = EngineError::InsufficientData {
            label: RiskLabel::Medium,
            count: 1,
        };
        let message = err.to_string();
        assert!(message.contains("Medium Risk"));
        assert!(message.contains('1'));
    }
}
