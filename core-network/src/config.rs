//! Network service configuration

use core_runtime::config::{ParseServerConfig, DEFAULT_REQUEST_TIMEOUT};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Where and how the network service talks to the Parse server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub base_url: Url,
    /// Static headers (application id, client key, extras)
    pub headers: BTreeMap<String, String>,
    pub request_timeout: Duration,
}

impl NetworkConfig {
    pub fn new(base_url: Url, headers: BTreeMap<String, String>) -> Self {
        Self {
            base_url,
            headers,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl From<&ParseServerConfig> for NetworkConfig {
    fn from(config: &ParseServerConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            headers: config.headers(),
            request_timeout: config.request_timeout,
        }
    }
}
