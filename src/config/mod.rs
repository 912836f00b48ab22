//! Configuration types for the Wafeq API client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: the resolved, immutable configuration
//! - [`ClientConfigBuilder`]: user-supplied settings, resolved by
//!   [`ClientConfigBuilder::build`]
//! - [`ApiKey`]: a validated API key newtype with masked debug output
//! - [`BaseUrl`]: a validated API base URL
//!
//! Resolution is pure: it never touches the network, and building the same
//! builder twice yields equal configurations.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use wafeq_api::{ClientConfig, DEFAULT_BASE_URL};
//!
//! let config = ClientConfig::builder()
//!     .api_key("my-api-key")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
//! assert_eq!(config.timeout(), Duration::from_secs(10));
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.wafeq.com/v1";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 10_000;

/// Resolved configuration for a [`WafeqClient`](crate::WafeqClient).
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`. It is created once and
/// never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// User-supplied client settings.
///
/// Only `api_key` is required. The builder is `Deserialize`, so settings can
/// be loaded from any serde source (a config file, environment adapters, ...)
/// and then resolved with [`build`](Self::build).
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`] (an empty string also falls back to it)
/// - `timeout_millis`: [`DEFAULT_TIMEOUT_MILLIS`]
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use wafeq_api::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .api_key("key")
///     .base_url("http://localhost:8080/v1")
///     .timeout_millis(2_500)
///     .user_agent_prefix("Billing/2.1")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), "http://localhost:8080/v1");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_millis: Option<u64>,
    user_agent_prefix: Option<String>,
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "*****"))
            .field("base_url", &self.base_url)
            .field("timeout_millis", &self.timeout_millis)
            .field("user_agent_prefix", &self.user_agent_prefix)
            .finish()
    }
}

impl ClientConfigBuilder {
    /// Creates a new builder with no settings applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout in milliseconds.
    #[must_use]
    pub const fn timeout_millis(mut self, millis: u64) -> Self {
        self.timeout_millis = Some(millis);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_millis(millis)
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Resolves these settings into a [`ClientConfig`], applying defaults.
    ///
    /// Takes `&self` so the same settings can be resolved repeatedly; the
    /// result is always value-equal.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if no API key was supplied
    /// - [`ConfigError::EmptyApiKey`] if the API key is empty
    /// - [`ConfigError::InvalidBaseUrl`] if the base URL has no HTTP(S) scheme
    /// - [`ConfigError::InvalidTimeout`] if the timeout is zero
    pub fn build(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })
            .and_then(ApiKey::new)?;

        let base_url = match self.base_url.as_deref() {
            Some(url) if !url.trim().is_empty() => BaseUrl::new(url)?,
            _ => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        let millis = self.timeout_millis.unwrap_or(DEFAULT_TIMEOUT_MILLIS);
        if millis == 0 {
            return Err(ConfigError::InvalidTimeout { millis });
        }

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout: Duration::from_millis(millis),
            user_agent_prefix: self.user_agent_prefix.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = ClientConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_rejects_empty_api_key() {
        let result = ClientConfig::builder().api_key("").build();
        assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder().api_key("key").build().unwrap();

        assert_eq!(config.api_key().as_ref(), "key");
        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_empty_base_url_falls_back_to_default() {
        let config = ClientConfig::builder()
            .api_key("key")
            .base_url("")
            .build()
            .unwrap();
        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = ClientConfig::builder()
            .api_key("key")
            .base_url("not a url")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = ClientConfig::builder()
            .api_key("key")
            .timeout_millis(0)
            .build();
        assert_eq!(result, Err(ConfigError::InvalidTimeout { millis: 0 }));
    }

    #[test]
    fn test_timeout_from_duration() {
        let config = ClientConfig::builder()
            .api_key("key")
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(3_000));
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = ClientConfig::builder()
            .api_key("key")
            .base_url("https://sandbox.example.com/v1/");

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_builder_deserializes_from_json() {
        let builder: ClientConfigBuilder = serde_json::from_value(serde_json::json!({
            "api_key": "from-file",
            "timeout_millis": 1500
        }))
        .unwrap();

        let config = builder.build().unwrap();
        assert_eq!(config.api_key().as_ref(), "from-file");
        assert_eq!(config.timeout(), Duration::from_millis(1_500));
        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_debug_masks_api_key() {
        let config = ClientConfig::builder().api_key("hidden-key").build().unwrap();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("hidden-key"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
    }
}
