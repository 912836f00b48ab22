//! The public Wafeq API client.
//!
//! [`WafeqClient`] exposes one method per API operation. Typed operations
//! validate their payload before sending it and decode the server's answer
//! into a typed model; [`WafeqClient::request`] is the untyped escape hatch.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::{
    normalize, ApiError, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    RawFailure, ResponseBody, ResponseKind,
};
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::resources::{Bill, BillCreateParams, BulkSendInvoiceParams, Invoice, InvoiceCreateParams};
use crate::validation::{Constraint, Validate, ValidationErrors};

/// Options for [`WafeqClient::request`].
///
/// # Example
///
/// ```rust
/// use wafeq_api::clients::ResponseKind;
/// use wafeq_api::RequestOptions;
///
/// let options = RequestOptions::new()
///     .response_kind(ResponseKind::Binary)
///     .query_param("page", "2")
///     .header("X-Request-Source", "reports");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    response_kind: ResponseKind,
    query: HashMap<String, String>,
    headers: HashMap<String, String>,
}

impl RequestOptions {
    /// Creates options for a JSON request with no extras.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how the response body is read.
    #[must_use]
    pub const fn response_kind(mut self, kind: ResponseKind) -> Self {
        self.response_kind = kind;
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a request header, overriding a default header of the same name.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Client for the Wafeq accounting API.
///
/// Every typed method:
/// 1. validates its input, failing with [`ApiError::Validation`] before any
///    network call,
/// 2. sends exactly one request,
/// 3. decodes the response, failing with [`ApiError::MalformedResponse`]
///    when it does not have the expected shape.
///
/// # Thread Safety
///
/// `WafeqClient` is `Clone`, `Send` and `Sync`. Clones share one connection
/// pool and concurrent calls are independent.
///
/// # Example
///
/// ```rust,ignore
/// use wafeq_api::resources::{Currency, InvoiceCreateParams, LineItem};
/// use wafeq_api::WafeqClient;
///
/// let client = WafeqClient::from_api_key("my-api-key")?;
///
/// let params = InvoiceCreateParams::new(
///     "INV-001",
///     "2024-04-15",
///     "contact-id",
///     Currency::Sar,
///     vec![LineItem::new("account-id", "Consulting", 1.0, 500.0)],
/// );
///
/// let invoice = client.create_invoice(&params).await?;
/// let pdf = client.download_invoice_pdf(&invoice.id).await?;
/// ```
#[derive(Clone, Debug)]
pub struct WafeqClient {
    config: ClientConfig,
    http_client: HttpClient,
}

// Verify WafeqClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WafeqClient>();
};

impl WafeqClient {
    /// Creates a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the HTTP transport cannot be
    /// initialized.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http_client = HttpClient::new(&config)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Creates a client with default settings for the given API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if `api_key` is empty.
    pub fn from_api_key(api_key: &str) -> Result<Self, ConfigError> {
        let config = ClientConfig::builder().api_key(api_key).build()?;
        Self::new(config)
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates an invoice (`POST /invoices/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `params` fails validation, or any
    /// other [`ApiError`] raised by the call.
    pub async fn create_invoice(&self, params: &InvoiceCreateParams) -> Result<Invoice, ApiError> {
        let response = self
            .send_validated(HttpMethod::Post, "/invoices/", params)
            .await?;
        decode_json(response)
    }

    /// Fetches an invoice by ID (`GET /invoices/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `invoice_id` is empty, or any
    /// other [`ApiError`] raised by the call.
    pub async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice, ApiError> {
        let path = resource_path("invoices", "invoice_id", invoice_id, "")?;
        let response = self.send(HttpRequest::builder(HttpMethod::Get, path)).await?;
        decode_json(response)
    }

    /// Deletes an invoice (`DELETE /invoices/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `invoice_id` is empty, or any
    /// other [`ApiError`] raised by the call.
    pub async fn delete_invoice(&self, invoice_id: &str) -> Result<(), ApiError> {
        let path = resource_path("invoices", "invoice_id", invoice_id, "")?;
        self.send(HttpRequest::builder(HttpMethod::Delete, path))
            .await?;
        Ok(())
    }

    /// Cancels an invoice (`POST /invoices/{id}/cancel`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `invoice_id` is empty, or any
    /// other [`ApiError`] raised by the call.
    pub async fn cancel_invoice(&self, invoice_id: &str) -> Result<(), ApiError> {
        let path = resource_path("invoices", "invoice_id", invoice_id, "cancel")?;
        self.send(HttpRequest::builder(HttpMethod::Post, path))
            .await?;
        Ok(())
    }

    /// Downloads the PDF rendition of an invoice
    /// (`GET /invoices/{id}/download/`).
    ///
    /// The bytes are returned exactly as received.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `invoice_id` is empty, or any
    /// other [`ApiError`] raised by the call.
    pub async fn download_invoice_pdf(&self, invoice_id: &str) -> Result<Vec<u8>, ApiError> {
        let path = resource_path("invoices", "invoice_id", invoice_id, "download/")?;
        self.download(path).await
    }

    /// Creates a bill (`POST /bills/`).
    ///
    /// Besides the usual checks, a paginated list body or a body without
    /// `id` and `bill_number` is rejected as [`ApiError::MalformedResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `params` fails validation,
    /// [`ApiError::MalformedResponse`] if the server does not answer with a
    /// single bill, or any other [`ApiError`] raised by the call.
    pub async fn create_bill(&self, params: &BillCreateParams) -> Result<Bill, ApiError> {
        let response = self
            .send_validated(HttpMethod::Post, "/bills/", params)
            .await?;
        let status = response.status;
        let body = into_json(response);

        if body.get("count").is_some() && body.get("results").is_some() {
            return Err(ApiError::malformed(
                status,
                "expected a bill object but received a paginated list",
                Some(body),
            ));
        }

        let has_text = |key: &str| {
            body.get(key)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty())
        };
        if !has_text("id") || !has_text("bill_number") {
            return Err(ApiError::malformed(
                status,
                "bill was not created properly: missing `id` or `bill_number`",
                Some(body),
            ));
        }

        decode(status, body)
    }

    /// Downloads the PDF rendition of a bill (`GET /bills/{id}/download/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `bill_id` is empty, or any other
    /// [`ApiError`] raised by the call.
    pub async fn download_bill_pdf(&self, bill_id: &str) -> Result<Vec<u8>, ApiError> {
        let path = resource_path("bills", "bill_id", bill_id, "download/")?;
        self.download(path).await
    }

    /// Creates and delivers an invoice in one call
    /// (`POST /api-invoices/bulk_send/`).
    ///
    /// Any success status without an `error` marker counts as delivered.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `params` fails validation (for
    /// example more than six recipients in a bucket), or any other
    /// [`ApiError`] raised by the call.
    pub async fn bulk_send_invoices(&self, params: &BulkSendInvoiceParams) -> Result<(), ApiError> {
        self.send_validated(HttpMethod::Post, "/api-invoices/bulk_send/", params)
            .await?;
        Ok(())
    }

    /// Sends an arbitrary request.
    ///
    /// No payload validation and no response shaping is applied. Status and
    /// `error`-marker classification still are.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] raised by the call.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use wafeq_api::clients::HttpMethod;
    /// use wafeq_api::RequestOptions;
    ///
    /// let body = client
    ///     .request(HttpMethod::Get, "/contacts/", None, RequestOptions::new())
    ///     .await?;
    /// let contacts = body.into_json();
    /// ```
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<ResponseBody, ApiError> {
        let builder = HttpRequest::builder(method, path)
            .maybe_body(body)
            .response_kind(options.response_kind)
            .query(options.query)
            .extra_headers(options.headers);
        let response = self.send(builder).await?;
        Ok(response.body)
    }

    async fn send_validated<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: &P,
    ) -> Result<HttpResponse, ApiError>
    where
        P: Validate + Serialize,
    {
        params
            .validate()
            .map_err(|e| normalize(RawFailure::Validation(e)))?;
        let body = serde_json::to_value(params)?;
        self.send(HttpRequest::builder(method, path).body(body))
            .await
    }

    async fn download(&self, path: String) -> Result<Vec<u8>, ApiError> {
        let builder = HttpRequest::builder(HttpMethod::Get, path).response_kind(ResponseKind::Binary);
        let response = self.send(builder).await?;
        Ok(response.body.into_bytes().unwrap_or_default())
    }

    async fn send(&self, builder: HttpRequestBuilder) -> Result<HttpResponse, ApiError> {
        let request = builder
            .build()
            .map_err(|e| normalize(RawFailure::Validation(e.into())))?;
        self.http_client.dispatch(request).await
    }
}

/// Builds `/{collection}/{id}/{suffix}` with `id` percent-encoded.
fn resource_path(
    collection: &str,
    field: &str,
    id: &str,
    suffix: &str,
) -> Result<String, ApiError> {
    if id.trim().is_empty() {
        return Err(normalize(RawFailure::Validation(ValidationErrors::single(
            field,
            Constraint::Required,
            format!("{field} is required"),
        ))));
    }
    Ok(format!(
        "/{collection}/{}/{suffix}",
        urlencoding::encode(id)
    ))
}

fn into_json(response: HttpResponse) -> Value {
    response.body.into_json().unwrap_or(Value::Null)
}

fn decode_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let status = response.status;
    decode(status, into_json(response))
}

fn decode<T: DeserializeOwned>(status: u16, body: Value) -> Result<T, ApiError> {
    match T::deserialize(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(status, error = %e, "Wafeq API response did not match the expected schema");
            Err(ApiError::malformed(
                status,
                format!("response does not match the expected schema: {e}"),
                Some(body),
            ))
        }
    }
}
