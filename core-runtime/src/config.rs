//! # Parse Server Configuration
//!
//! Connection settings for the Parse backend the defect module talks to.
//!
//! ## Usage
//!
//! ### Builder
//!
//! ```
//! use core_runtime::config::ParseServerConfig;
//!
//! let config = ParseServerConfig::builder()
//!     .base_url("https://parse.example.com/parse")
//!     .application_id("osca")
//!     .client_key("client-key")
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.base_url.as_str(), "https://parse.example.com/parse");
//! ```
//!
//! ### Environment
//!
//! [`ParseServerConfig::from_env`] reads:
//!
//! | Variable | Required |
//! |---|---|
//! | `PARSE_BASE_URL` | yes |
//! | `PARSE_APPLICATION_ID` | yes |
//! | `PARSE_CLIENT_KEY` | yes |
//! | `PARSE_REQUEST_TIMEOUT_SECS` | no (default 30) |
//!
//! ## Error Handling
//!
//! The builder validates eagerly and reports what is missing:
//!
//! ```should_panic
//! use core_runtime::config::ParseServerConfig;
//!
//! let config = ParseServerConfig::builder()
//!     .base_url("https://parse.example.com")
//!     .build()
//!     .expect("Should fail - missing application id");
//! ```

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Header carrying the Parse application id
pub const APPLICATION_ID_HEADER: &str = "X-Parse-Application-Id";

/// Header carrying the Parse client key
pub const CLIENT_KEY_HEADER: &str = "X-Parse-Client-Key";

/// Default per-request timeout handed to the HTTP client
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Parse server connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseServerConfig {
    /// Server mount point, e.g. `https://parse.example.com/parse`
    pub base_url: Url,

    pub application_id: String,

    pub client_key: String,

    /// Additional static headers sent with every request
    pub extra_headers: BTreeMap<String, String>,

    /// Timeout the HTTP client applies to each request
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ParseServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseServerConfig")
            .field("base_url", &self.base_url.as_str())
            .field("application_id", &self.application_id)
            .field("client_key", &"[REDACTED]")
            .field("extra_headers", &self.extra_headers.keys().collect::<Vec<_>>())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ParseServerConfig {
    pub fn builder() -> ParseServerConfigBuilder {
        ParseServerConfigBuilder::default()
    }

    /// Load the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| lookup(key).ok_or_else(|| Error::MissingEnv(key.to_string()));

        let mut builder = Self::builder()
            .base_url(require("PARSE_BASE_URL")?)
            .application_id(require("PARSE_APPLICATION_ID")?)
            .client_key(require("PARSE_CLIENT_KEY")?);

        if let Some(raw) = lookup("PARSE_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "PARSE_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Static authentication headers plus any extra headers.
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = self.extra_headers.clone();
        headers.insert(APPLICATION_ID_HEADER.to_string(), self.application_id.clone());
        headers.insert(CLIENT_KEY_HEADER.to_string(), self.client_key.clone());
        headers
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - base URL uses http or https and can carry a path
    /// - application id and client key are not blank
    /// - request timeout is within (0, 300s]
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Base URL must use http or https, got '{}'",
                self.base_url.scheme()
            )));
        }

        if self.base_url.cannot_be_a_base() {
            return Err(Error::Config(
                "Base URL cannot be used as a request base".to_string(),
            ));
        }

        if self.application_id.trim().is_empty() {
            return Err(Error::Config("Application id cannot be empty".to_string()));
        }

        if self.client_key.trim().is_empty() {
            return Err(Error::Config("Client key cannot be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout > MAX_REQUEST_TIMEOUT {
            return Err(Error::Config(
                "Request timeout exceeds maximum of 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`ParseServerConfig`].
#[derive(Default)]
pub struct ParseServerConfigBuilder {
    base_url: Option<String>,
    application_id: Option<String>,
    client_key: Option<String>,
    extra_headers: BTreeMap<String, String>,
    request_timeout: Option<Duration>,
}

impl ParseServerConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    pub fn client_key(mut self, key: impl Into<String>) -> Self {
        self.client_key = Some(key.into());
        self
    }

    /// Adds a static header sent with every request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<ParseServerConfig> {
        let raw_url = self
            .base_url
            .ok_or_else(|| Error::Config("Base URL is required".to_string()))?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", raw_url, e)))?;

        let application_id = self.application_id.ok_or_else(|| {
            Error::Config("Application id is required (X-Parse-Application-Id)".to_string())
        })?;
        let client_key = self.client_key.ok_or_else(|| {
            Error::Config("Client key is required (X-Parse-Client-Key)".to_string())
        })?;

        let config = ParseServerConfig {
            base_url,
            application_id,
            client_key,
            extra_headers: self.extra_headers,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        };

        config.validate()?;
        Ok(config)
    }
}
