//! # Host Bridge Traits
//!
//! Capability contracts between the defect-report core and the host
//! platform. Each trait is something the core needs but that must be
//! provided differently per platform (desktop, iOS, Android, web).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP transport
//! - [`SettingsStore`](storage::SettingsStore) - Key-value preferences (session token)
//! - [`BundleLocator`](bundle::BundleLocator) - Static resource bundle lookup
//! - [`MainScheduler`](scheduler::MainScheduler) - Delivery onto the UI-affine context
//! - [`AnalyticsSink`](analytics::AnalyticsSink) - Optional analytics hook
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! Desktop implementations live in `bridge-desktop`.
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should classify transport failures (bad request, offline, timeout) so the
//! core can map them without knowing platform error types.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so a single instance can be shared
//! across async tasks behind an `Arc`.

pub mod analytics;
pub mod bundle;
pub mod error;
pub mod http;
pub mod log;
pub mod scheduler;
pub mod storage;

pub use error::BridgeError;

pub use analytics::{AnalyticsEvent, AnalyticsSink};
pub use bundle::{BundleLocator, ResourceBundle, StaticBundleLocator};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use scheduler::{ImmediateScheduler, MainScheduler, MainTask};
pub use storage::SettingsStore;
