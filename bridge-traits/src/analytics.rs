//! Analytics Hook
//!
//! Optional sink for product analytics. Modules report coarse usage events;
//! the host decides where they go.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// A single analytics event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub properties: BTreeMap<String, String>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: Utc::now(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Analytics sink trait
///
/// Implementations must never carry personal data supplied by end users;
/// callers only pass identifiers and outcome labels.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn track(&self, event: AnalyticsEvent) -> Result<()>;
}
