//! HTTP layer for Wafeq API communication.
//!
//! This module sits below [`WafeqClient`](crate::WafeqClient): it turns an
//! [`HttpRequest`] into exactly one HTTP call and every failure into an
//! [`ApiError`].
//!
//! # Overview
//!
//! - [`HttpClient`]: the dispatcher
//! - [`HttpRequest`]: a request to be sent
//! - [`HttpResponse`]: a successful response
//! - [`HttpMethod`]: GET, POST, PUT, PATCH, DELETE
//! - [`ResponseKind`]: read the body as JSON or as raw bytes
//! - [`ApiError`] and [`normalize`]: the uniform error type and the function
//!   that produces it from a [`RawFailure`]
//!
//! # Example
//!
//! ```rust,ignore
//! use wafeq_api::ClientConfig;
//! use wafeq_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let config = ClientConfig::builder().api_key("key").build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/invoices/inv_1/").build()?;
//! let response = client.dispatch(request).await?;
//! ```
//!
//! # Success and failure
//!
//! Only 200, 201 and 204 are success. A successful JSON body that carries a
//! top-level `error` field is treated as a failure. Nothing is retried.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    normalize, ApiError, ErrorKind, HttpResponseError, InvalidHttpRequestError, RawFailure,
    FALLBACK_ERROR_MESSAGE,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, ResponseKind};
pub use http_response::{is_success_status, HttpResponse, ResponseBody};
