//! The request dispatcher.
//!
//! [`HttpClient`] issues exactly one HTTP request per call, classifies the
//! outcome, and routes every failure through [`normalize`].

use std::collections::HashMap;
use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::clients::errors::{normalize, ApiError, InvalidHttpRequestError, RawFailure};
use crate::clients::http_request::{HttpRequest, ResponseKind};
use crate::clients::http_response::{is_success_status, HttpResponse, ResponseBody};
use crate::config::{BaseUrl, ClientConfig};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Low-level HTTP client for the Wafeq API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers: `Authorization: Api-Key <key>`, JSON content type and
///   accept headers, and a `User-Agent`
/// - The configured request timeout
/// - Status classification: only 200, 201 and 204 are success
/// - Detection of a top-level `error` field in successful JSON bodies
///
/// Requests are never retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Clone`, `Send` and `Sync`. Clones share one connection
/// pool.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: BaseUrl,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: HashMap<&str, &str> = self
            .default_headers
            .iter()
            .map(|(k, v)| {
                let value = if k.eq_ignore_ascii_case("authorization") {
                    "*****"
                } else {
                    v.as_str()
                };
                (k.as_str(), value)
            })
            .collect();

        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &headers)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a dispatcher for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the underlying HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let user_agent = config.user_agent_prefix().map_or_else(
            || format!("wafeq-api-rust v{SDK_VERSION}"),
            |prefix| format!("{prefix} | wafeq-api-rust v{SDK_VERSION}"),
        );

        let mut default_headers = HashMap::new();
        default_headers.insert(
            "Authorization".to_string(),
            config.api_key().authorization_header(),
        );
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        })
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends `request` and classifies the outcome.
    ///
    /// For [`ResponseKind::Json`] an empty body is returned as `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if the request fails [`HttpRequest::verify`]
    /// - [`ApiError::Transport`] if no response is received (including timeouts)
    /// - [`ApiError::Response`] for a non-success status, or a success body
    ///   with a top-level `error` field
    /// - [`ApiError::MalformedResponse`] if a JSON body was expected but the
    ///   success body is not valid JSON
    pub async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        request
            .verify()
            .map_err(|e| normalize(RawFailure::Validation(e.into())))?;

        let url = self.base_url.join(&request.path);

        let headers = self
            .request_headers(&request)
            .map_err(|e| normalize(RawFailure::Validation(e.into())))?;

        let mut req_builder = self
            .client
            .request(request.http_method.into(), url.as_str())
            .headers(headers);
        if let Some(query) = request.query.as_ref().filter(|q| !q.is_empty()) {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            "Sending request to Wafeq API"
        );

        let res = req_builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %request.http_method,
                path = %request.path,
                error = %e,
                "Request to Wafeq API failed without a response"
            );
            normalize(RawFailure::Transport(e))
        })?;

        let status = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let bytes = res
            .bytes()
            .await
            .map_err(|e| normalize(RawFailure::Transport(e)))?;

        if !is_success_status(status) {
            tracing::warn!(
                method = %request.http_method,
                path = %request.path,
                status,
                "Wafeq API returned an error status"
            );
            let body = serde_json::from_slice::<Value>(&bytes).ok();
            return Err(normalize(RawFailure::Status { status, body }));
        }

        let body = match request.response_kind {
            ResponseKind::Binary => ResponseBody::Binary(bytes.to_vec()),
            ResponseKind::Json => {
                let value = Self::parse_json_body(status, &bytes)?;
                if has_error_marker(&value) {
                    tracing::warn!(
                        method = %request.http_method,
                        path = %request.path,
                        status,
                        "Wafeq API returned an error marker in a successful response"
                    );
                    return Err(normalize(RawFailure::ErrorMarker { status, body: value }));
                }
                ResponseBody::Json(value)
            }
        };

        tracing::debug!(path = %request.path, status, "Received response from Wafeq API");

        Ok(HttpResponse::new(status, res_headers, body))
    }

    /// Merges default, accept and caller headers. Later entries replace
    /// earlier ones of the same name, compared case-insensitively.
    fn request_headers(
        &self,
        request: &HttpRequest,
    ) -> Result<HeaderMap, InvalidHttpRequestError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            insert_header(&mut headers, name, value)?;
        }
        insert_header(&mut headers, "Accept", request.response_kind.accept())?;
        if let Some(extra) = &request.extra_headers {
            for (name, value) in extra {
                insert_header(&mut headers, name, value)?;
            }
        }
        Ok(headers)
    }

    fn parse_json_body(status: u16, bytes: &[u8]) -> Result<Value, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(bytes).map_err(|e| {
            ApiError::malformed(status, format!("response body is not valid JSON: {e}"), None)
        })
    }

    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

fn insert_header(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
) -> Result<(), InvalidHttpRequestError> {
    let invalid = || InvalidHttpRequestError::InvalidHeader {
        name: name.to_string(),
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
    let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
    headers.insert(header_name, header_value);
    Ok(())
}

/// Returns `true` if `body` is an object whose top-level `error` field is
/// truthy: not `null`, `false`, `0` or `""`.
fn has_error_marker(body: &Value) -> bool {
    body.get("error").is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::HttpMethod;
    use serde_json::json;

    fn test_config() -> ClientConfig {
        ClientConfig::builder()
            .api_key("test-api-key")
            .build()
            .unwrap()
    }

    #[test]
    fn test_authorization_header_uses_api_key_scheme() {
        let client = HttpClient::new(&test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Api-Key test-api-key".to_string())
        );
    }

    #[test]
    fn test_json_headers_are_set() {
        let client = HttpClient::new(&test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("wafeq-api-rust v"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .api_key("key")
            .user_agent_prefix("Billing/2.1")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Billing/2.1 | wafeq-api-rust v"));
    }

    #[test]
    fn test_debug_masks_authorization() {
        let client = HttpClient::new(&test_config()).unwrap();
        let debug = format!("{client:?}");

        assert!(debug.contains("HttpClient"));
        assert!(!debug.contains("test-api-key"));
    }

    #[test]
    fn test_request_headers_override_defaults_ignoring_case() {
        let client = HttpClient::new(&test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/x/")
            .header("accept", "application/pdf")
            .header("authorization", "Api-Key other")
            .build()
            .unwrap();

        let headers = client.request_headers(&request).unwrap();

        let accept: Vec<_> = headers.get_all("Accept").iter().collect();
        assert_eq!(accept, vec!["application/pdf"]);
        assert_eq!(headers.get_all("Authorization").iter().count(), 1);
        assert_eq!(headers["authorization"], "Api-Key other");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[test]
    fn test_request_headers_use_response_kind_accept() {
        let client = HttpClient::new(&test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/x/")
            .response_kind(ResponseKind::Binary)
            .build()
            .unwrap();

        let headers = client.request_headers(&request).unwrap();

        assert_eq!(headers["accept"], "*/*");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let client = HttpClient::new(&test_config()).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "/x/")
            .header("X-Note", "line\nbreak")
            .build()
            .unwrap();

        let result = client.request_headers(&request);

        assert_eq!(
            result,
            Err(InvalidHttpRequestError::InvalidHeader {
                name: "X-Note".to_string()
            })
        );
    }

    #[test]
    fn test_error_marker_detection() {
        assert!(has_error_marker(&json!({ "error": "boom" })));
        assert!(has_error_marker(&json!({ "error": { "code": 1 } })));
        assert!(has_error_marker(&json!({ "error": 1 })));
        assert!(has_error_marker(&json!({ "error": true })));
        assert!(has_error_marker(&json!({ "error": [] })));
        assert!(!has_error_marker(&json!({ "error": null })));
        assert!(!has_error_marker(&json!({ "error": false })));
        assert!(!has_error_marker(&json!({ "error": "" })));
        assert!(!has_error_marker(&json!({ "error": 0 })));
        assert!(!has_error_marker(&json!({ "error": 0.0 })));
        assert!(!has_error_marker(&json!({ "id": "inv_1" })));
        assert!(!has_error_marker(&json!([{ "error": "nested" }])));
        assert!(!has_error_marker(&Value::Null));
    }

    #[test]
    fn test_empty_json_body_is_null() {
        assert_eq!(HttpClient::parse_json_body(204, b"").unwrap(), Value::Null);
        assert_eq!(HttpClient::parse_json_body(200, b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_non_json_success_body_is_malformed() {
        let error = HttpClient::parse_json_body(200, b"<html>oops</html>").unwrap_err();
        assert!(matches!(
            error,
            ApiError::MalformedResponse { status: 200, .. }
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
