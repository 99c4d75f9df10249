//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the defect-report crates:
//! - Logging and tracing initialization
//! - Parse server configuration
//! - Runtime error type

pub mod config;
pub mod error;
pub mod logging;

pub use config::ParseServerConfig;
pub use error::{Error, Result};
