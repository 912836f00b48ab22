//! The uniform error type returned by every API call, and the normalizer
//! that produces it.
//!
//! # Error Handling
//!
//! Every failure, whatever its origin, is reported as an [`ApiError`]:
//!
//! - [`ApiError::Validation`]: the request payload failed its schema; no
//!   network call was made
//! - [`ApiError::Response`]: the server rejected the request, or answered
//!   with a logical `error` marker
//! - [`ApiError::MalformedResponse`]: the server answered with a success
//!   status but a body the client cannot make sense of
//! - [`ApiError::Transport`]: no response was received
//! - [`ApiError::Serialization`]: the request body could not be encoded
//!
//! # Example
//!
//! ```rust,ignore
//! use wafeq_api::{ApiError, WafeqClient};
//!
//! match client.get_invoice("inv_123").await {
//!     Ok(invoice) => println!("Balance: {}", invoice.balance),
//!     Err(ApiError::Response(e)) => println!("API error {}: {}", e.status, e.message),
//!     Err(ApiError::Transport(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::validation::{Constraint, ValidationErrors};

/// Message used when the server gives no usable error message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred with the Wafeq API";

/// Error returned when the server rejects a request.
///
/// # Example
///
/// ```rust
/// use wafeq_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     status: 404,
///     message: "Not found.".to_string(),
///     payload: None,
/// };
///
/// assert_eq!(error.to_string(), "Not found.");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The server's message, or [`FALLBACK_ERROR_MESSAGE`].
    pub message: String,
    /// The raw response body, when one was returned.
    pub payload: Option<Value>,
}

/// Error returned when a request is rejected before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path was empty.
    #[error("Cannot send a request without a path.")]
    EmptyPath,

    /// A body was supplied for a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method that was used.
        method: String,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("Cannot send header `{name}`: invalid name or value.")]
    InvalidHeader {
        /// The offending header name, as supplied.
        name: String,
    },
}

impl From<InvalidHttpRequestError> for ValidationErrors {
    fn from(error: InvalidHttpRequestError) -> Self {
        match error {
            InvalidHttpRequestError::EmptyPath => {
                Self::single("path", Constraint::Required, error.to_string())
            }
            InvalidHttpRequestError::BodyNotAllowed { .. } => {
                Self::single("body", Constraint::Type, error.to_string())
            }
            InvalidHttpRequestError::InvalidHeader { ref name } => {
                Self::single(format!("headers.{name}"), Constraint::Format, error.to_string())
            }
        }
    }
}

/// Coarse classification of an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Local schema failure.
    Validation,
    /// Server rejection or logical error marker.
    Response,
    /// Success status with an unusable body.
    MalformedResponse,
    /// Network failure or timeout.
    Transport,
    /// Request body encoding failure.
    Serialization,
}

/// Unified error type for every API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload failed validation. No request was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The server returned a non-success status or an `error` marker.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The server returned a success status with an unusable body.
    #[error("Malformed response from the Wafeq API (status {status}): {reason}")]
    MalformedResponse {
        /// The HTTP status code of the response.
        status: u16,
        /// What was wrong with the body.
        reason: String,
        /// The raw body, when it was valid JSON.
        payload: Option<Value>,
    },

    /// No response was received.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Response(_) => ErrorKind::Response,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Returns the HTTP status, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.status),
            Self::MalformedResponse { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Validation(_) | Self::Serialization(_) => None,
        }
    }

    /// Returns the raw response body, when one was received.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Response(e) => e.payload.as_ref(),
            Self::MalformedResponse { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Returns the field-level errors of a validation failure.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub(crate) fn malformed(
        status: u16,
        reason: impl Into<String>,
        payload: Option<Value>,
    ) -> Self {
        Self::MalformedResponse {
            status,
            reason: reason.into(),
            payload,
        }
    }
}

/// A failure as observed by the dispatcher, before normalization.
#[derive(Debug)]
pub enum RawFailure {
    /// The server answered with a non-success status.
    Status {
        /// The HTTP status code.
        status: u16,
        /// The body, when it was valid JSON.
        body: Option<Value>,
    },
    /// The server answered with a success status but the body carries a
    /// top-level `error` field.
    ErrorMarker {
        /// The HTTP status code.
        status: u16,
        /// The full body.
        body: Value,
    },
    /// The request never produced a response.
    Transport(reqwest::Error),
    /// The payload failed local validation.
    Validation(ValidationErrors),
}

/// Converts any failure into an [`ApiError`].
///
/// Pure and total: every input yields exactly one error, and the same input
/// always yields an equivalent error.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use wafeq_api::clients::{normalize, RawFailure, FALLBACK_ERROR_MESSAGE};
///
/// let error = normalize(RawFailure::Status {
///     status: 400,
///     body: Some(json!({ "message": "Invalid contact" })),
/// });
/// assert_eq!(error.to_string(), "Invalid contact");
/// assert_eq!(error.status(), Some(400));
///
/// let error = normalize(RawFailure::Status { status: 500, body: None });
/// assert_eq!(error.to_string(), FALLBACK_ERROR_MESSAGE);
/// ```
#[must_use]
pub fn normalize(failure: RawFailure) -> ApiError {
    match failure {
        RawFailure::Status { status, body } => {
            let message = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .map_or_else(|| FALLBACK_ERROR_MESSAGE.to_string(), str::to_string);
            ApiError::Response(HttpResponseError {
                status,
                message,
                payload: body,
            })
        }
        RawFailure::ErrorMarker { status, body } => {
            let message = match body.get("error") {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Null | Value::String(_)) | None => FALLBACK_ERROR_MESSAGE.to_string(),
                Some(other) => other.to_string(),
            };
            ApiError::Response(HttpResponseError {
                status,
                message,
                payload: Some(body),
            })
        }
        RawFailure::Transport(error) => ApiError::Transport(error),
        RawFailure::Validation(errors) => ApiError::Validation(errors),
    }
}
