//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction, so an invalid value
//! can never reach the HTTP layer.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Wafeq API key.
///
/// The key is sent on every request as `Authorization: Api-Key <key>`. Its
/// `Debug` output is masked so the key does not leak into logs.
///
/// # Example
///
/// ```rust
/// use wafeq_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }

    /// Returns the value of the `Authorization` header for this key.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Api-Key {}", self.0)
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated API base URL.
///
/// The URL must carry an `http://` or `https://` scheme. Trailing slashes
/// are trimmed so request paths can always be appended with a leading `/`.
///
/// # Example
///
/// ```rust
/// use wafeq_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.wafeq.com/v1/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.wafeq.com/v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no HTTP(S)
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));

        match rest {
            Some(host_and_path) if !host_and_path.is_empty() && !host_and_path.starts_with('/') => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    /// Joins a request path onto this base URL.
    ///
    /// A missing leading `/` on `path` is added.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::new("super-secret").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, "ApiKey(*****)");
    }

    #[test]
    fn test_api_key_authorization_header() {
        let key = ApiKey::new("abc.123").unwrap();
        assert_eq!(key.authorization_header(), "Api-Key abc.123");
    }

    #[test]
    fn test_api_key_deserialize_validates() {
        let key: ApiKey = serde_json::from_str(r#""k""#).unwrap();
        assert_eq!(key.as_ref(), "k");
        assert!(serde_json::from_str::<ApiKey>(r#""""#).is_err());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let url = BaseUrl::new("https://api.wafeq.com/v1///").unwrap();
        assert_eq!(url.as_ref(), "https://api.wafeq.com/v1");
    }

    #[test]
    fn test_base_url_accepts_plain_http() {
        let url = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        assert!(matches!(
            BaseUrl::new("api.wafeq.com/v1"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            BaseUrl::new("ftp://api.wafeq.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            BaseUrl::new("https://"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_join() {
        let url = BaseUrl::new("https://api.wafeq.com/v1").unwrap();
        assert_eq!(url.join("/invoices/"), "https://api.wafeq.com/v1/invoices/");
        assert_eq!(url.join("contacts"), "https://api.wafeq.com/v1/contacts");
    }

    #[test]
    fn test_base_url_serde_round_trip_uses_plain_string() {
        let url = BaseUrl::new("https://api.wafeq.com/v1").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""https://api.wafeq.com/v1""#);
        let parsed: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, url);
    }
}
