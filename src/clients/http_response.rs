//! HTTP response types.

use std::collections::HashMap;

use serde_json::Value;

/// The body of a successful response.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// A JSON document. An empty body (e.g. `204 No Content`) is `Null`.
    Json(Value),
    /// Raw bytes, exactly as received.
    Binary(Vec<u8>),
}

impl ResponseBody {
    /// Returns the JSON document, if this is a JSON body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Binary(_) => None,
        }
    }

    /// Returns the raw bytes, if this is a binary body.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Json(_) => None,
            Self::Binary(bytes) => Some(bytes),
        }
    }

    /// Consumes the body and returns the JSON document.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Binary(_) => None,
        }
    }

    /// Consumes the body and returns the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Json(_) => None,
            Self::Binary(bytes) => Some(bytes),
        }
    }
}

/// A successful response from the Wafeq API.
///
/// Header names are stored lowercased.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use serde_json::json;
/// use wafeq_api::clients::{HttpResponse, ResponseBody};
///
/// let mut headers = HashMap::new();
/// headers.insert("x-request-id".to_string(), vec!["req-1".to_string()]);
///
/// let response = HttpResponse::new(201, headers, ResponseBody::Json(json!({ "id": "inv_1" })));
/// assert!(response.is_ok());
/// assert_eq!(response.request_id(), Some("req-1"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lowercased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body.
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: u16, headers: HashMap<String, Vec<String>>, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns `true` for the statuses treated as success: 200, 201 and 204.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        is_success_status(self.status)
    }

    /// Returns the first value of the header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}

/// Returns `true` for 200, 201 and 204. Every other status is a failure.
#[must_use]
pub const fn is_success_status(status: u16) -> bool {
    matches!(status, 200 | 201 | 204)
}
