//! Configuration error types for the Wafeq API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails at construction time, before any request is
//! attempted. Runtime failures use [`ApiError`](crate::clients::ApiError).
//!
//! # Example
//!
//! ```rust
//! use wafeq_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while resolving client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Wafeq API key.")]
    EmptyApiKey,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.wafeq.com/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Timeout must be positive.
    #[error("Invalid timeout of {millis}ms. The request timeout must be greater than zero.")]
    InvalidTimeout {
        /// The rejected timeout in milliseconds.
        millis: u64,
    },

    /// The underlying HTTP transport could not be initialized.
    #[error("Failed to initialize HTTP transport: {reason}")]
    Transport {
        /// Description of the initialization failure.
        reason: String,
    },
}
