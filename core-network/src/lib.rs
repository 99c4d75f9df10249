//! # Parse Network Service
//!
//! Generic REST resource abstraction over a Parse server:
//!
//! - [`NetworkConfig`] - base URL, static headers, request timeout
//! - [`resource`] - immutable request descriptors (class listing, config,
//!   class upload, file upload)
//! - [`NetworkService`] - executes descriptors through a host
//!   [`HttpClient`](bridge_traits::HttpClient) and decodes the responses
//! - [`NetworkError`] - transport failure taxonomy
//!
//! Feature modules build descriptors and hand them to the service; they never
//! assemble URLs or parse HTTP responses themselves.

pub mod config;
pub mod error;
pub mod resource;
pub mod response;
pub mod service;

pub use config::NetworkConfig;
pub use error::{NetworkError, Result};
pub use resource::{
    ClassRequestResource, ConfigRequestResource, Downloadable, ParseClassObject, RequestResource,
    UploadClassRequestResource, UploadFileRequestResource, Uploadable,
};
pub use response::{ParseUploadFileResponse, ParseUploadResponse};
pub use service::NetworkService;
