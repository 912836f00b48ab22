//! # Wafeq API Rust Client
//!
//! A typed async client for the Wafeq accounting and invoicing API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Configuration via [`ClientConfig`] and [`ClientConfigBuilder`], with
//!   defaults for the base URL and timeout
//! - Typed request and response payloads in [`resources`]
//! - Schema validation of every outgoing payload via [`validation`]
//! - One uniform error type, [`ApiError`], for every failure
//! - [`WafeqClient`], with one method per API operation and a generic
//!   [`request`](WafeqClient::request) escape hatch
//!
//! ## Quick Start
//!
//! ```rust
//! use wafeq_api::{ClientConfig, WafeqClient};
//!
//! let config = ClientConfig::builder()
//!     .api_key("your-api-key")
//!     .timeout_millis(5_000)
//!     .build()
//!     .unwrap();
//!
//! let client = WafeqClient::new(config).unwrap();
//! ```
//!
//! ## Creating an Invoice
//!
//! ```rust,ignore
//! use wafeq_api::resources::{Currency, InvoiceCreateParams, LineItem};
//!
//! let params = InvoiceCreateParams::new(
//!     "INV-001",
//!     "2024-04-15",
//!     "contact-id",
//!     Currency::Sar,
//!     vec![LineItem::new("account-id", "Consulting", 2.0, 250.0)],
//! );
//!
//! let invoice = client.create_invoice(&params).await?;
//! println!("Created {} with balance {}", invoice.id, invoice.balance);
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wafeq_api::{ApiError, ErrorKind};
//!
//! match client.get_invoice("inv_123").await {
//!     Ok(invoice) => println!("{}", invoice.invoice_number),
//!     Err(e) if e.kind() == ErrorKind::Validation => eprintln!("Bad input: {e}"),
//!     Err(e) => eprintln!("Request failed (status {:?}): {e}", e.status()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: payloads are checked before any network call
//! - **One request per call**: nothing is retried, batched or cached
//! - **Thread-safe**: the client is `Clone + Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod validation;

// Re-export public types at crate root for convenience
pub use client::{RequestOptions, WafeqClient};
pub use config::{
    ApiKey, BaseUrl, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MILLIS,
};
pub use error::ConfigError;

// Re-export error and transport types
pub use clients::{
    ApiError, ErrorKind, HttpMethod, HttpResponseError, ResponseBody, ResponseKind,
    FALLBACK_ERROR_MESSAGE,
};
pub use validation::{FieldError, Validate, ValidationErrors};
