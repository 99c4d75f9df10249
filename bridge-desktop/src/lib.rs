//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` (rustls, single attempt per call)
//! - `SettingsStore` using a SQLite-backed key-value store
//! - `BundleLocator` resolving bundles as directories below a root
//! - `MainScheduler` backed by a queue the host's main loop drains
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{FsBundleLocator, ReqwestHttpClient, SqliteSettingsStore};
//!
//! #[tokio::main]
//! async fn main() -> bridge_traits::error::Result<()> {
//!     let http_client = ReqwestHttpClient::new()?;
//!     let settings = SqliteSettingsStore::new("settings.db".into()).await?;
//!     let bundles = FsBundleLocator::new("/usr/share/osca/bundles");
//!
//!     // Hand these to the defect module's dependencies
//!     Ok(())
//! }
//! ```

mod bundle;
mod http;
mod scheduler;
mod settings;

pub use bundle::FsBundleLocator;
pub use http::ReqwestHttpClient;
pub use scheduler::{MainQueue, QueuedMainScheduler};
pub use settings::SqliteSettingsStore;
