//! # Defect Report Module
//!
//! Client facade for reporting infrastructure defects (potholes, broken
//! street lights, ...) to a municipal Parse backend.
//!
//! ## Overview
//!
//! - [`models`] - contact directory entries, report payloads, server config
//! - [`resources`] - request descriptors for the defect endpoints
//! - [`session`] - per-call header computation (session token)
//! - [`facade`] - [`DefectModule`] with the public operations
//! - [`bootstrap`] - module creation and the process-wide resource bundle
//! - [`error`] - [`DefectError`] and the transport error mapping
//!
//! ## Example
//!
//! ```ignore
//! use core_defect::{DefectDependencies, DefectModule, FormData};
//!
//! let module = DefectModule::create(
//!     DefectDependencies::new(network_service, settings_store),
//!     &bundle_locator,
//! );
//!
//! let contacts = module.get_all_defect_form_contacts().await?;
//! let report = FormData::new()
//!     .with_message("Pothole in front of no. 12")
//!     .with_contact_id(contacts[0].object_id().unwrap_or_default());
//! let ack = module.put_defect(report).await?;
//! ```

pub mod bootstrap;
#[cfg(feature = "desktop-shims")]
pub mod desktop;
pub mod error;
pub mod events;
pub mod facade;
pub mod models;
pub mod resources;
pub mod session;

pub use bootstrap::{DefectDependencies, BUNDLE_PREFIX, VERSION};
pub use error::{DefectError, DefectResult};
pub use events::DefectEvent;
pub use facade::{DefectModule, PutDefect, DEFAULT_CONTACT_LIMIT};
pub use models::{FormContact, FormData, ParseConfig, ParseGeoPoint};
pub use session::{SessionHeaderPolicy, SESSION_TOKEN_HEADER, SESSION_TOKEN_KEY};

pub use core_network::{ParseUploadFileResponse, ParseUploadResponse};
