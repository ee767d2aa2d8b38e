//! Error types for the Shopfront client.

use thiserror::Error;

use crate::api::ApiError;
use crate::catalog::ProductValidationError;

/// A shared error type for the entire Shopfront client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum ShopfrontError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted state could not be turned back into a domain value
    #[error("Decode error: {0}")]
    Decode(String),

    /// The current session is missing or lacks the required identity
    #[error("Security error: {0}")]
    Security(String),

    /// User supplied data rejected before any request is made
    #[error("Validation error: {0}")]
    Validation(#[from] ProductValidationError),

    /// Backend call failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Operation exists in the UI but has no backend counterpart
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopfrontError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates an Unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a security error
    pub fn is_security(&self) -> bool {
        matches!(self, Self::Security(_))
    }

    /// Check if this is an unsupported operation
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl From<std::io::Error> for ShopfrontError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for ShopfrontError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ShopfrontError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ShopfrontError>`.
pub type Result<T> = std::result::Result<T, ShopfrontError>;
