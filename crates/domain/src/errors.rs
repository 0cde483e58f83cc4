//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Registrar
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RegistrarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schedule error: {0}")]
    Schedule(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Every attempt of a single logical request failed.
    ///
    /// `last_error` carries the description of the most recent failure.
    #[error("Exhausted retries after {attempts} attempts: {last_error}")]
    ExhaustedRetries { attempts: u32, last_error: String },
}

impl RegistrarError {
    /// Returns true when this error reports retry exhaustion.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::ExhaustedRetries { .. })
    }
}

/// Result type alias for Registrar operations
pub type Result<T> = std::result::Result<T, RegistrarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_retries_message_carries_last_error() {
        let err = RegistrarError::ExhaustedRetries {
            attempts: 5,
            last_error: "HTTP 503: unavailable".into(),
        };

        assert!(err.is_exhausted());
        assert_eq!(err.to_string(), "Exhausted retries after 5 attempts: HTTP 503: unavailable");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = RegistrarError::Config("missing base_url".into());
        let json = serde_json::to_value(&err).expect("serialize");

        assert_eq!(json["type"], "Config");
        assert_eq!(json["message"], "missing base_url");
        assert!(!err.is_exhausted());
    }
}
