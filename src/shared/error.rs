//! Shared Error Types
//!
//! Errors that can be raised outside of the HTTP layer: request-field
//! validation, JSON (de)serialization and decoding of stored values.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A request field failed validation
//! - `DecodeError` - A stored value could not be mapped back to a typed field
//!
//! All error types are `Send + Sync` so they can be boxed into `sqlx::Error::Decode`.
use thiserror::Error;

/// Shared error types that can occur in any layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Stored value does not map to a known variant
    #[error("Cannot decode '{value}' for field '{field}'")]
    DecodeError {
        /// Column or field being decoded
        field: String,
        /// Raw stored value
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DecodeError {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Helper trait for converting serialization errors
impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
