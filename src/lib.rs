//! Workspace umbrella crate.
//!
//! Host applications depend on `defect-workspace` to get the defect module
//! plus, with the default `desktop-shims` feature, the desktop bridge
//! implementations, without wiring each crate individually.

pub use core_defect::*;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop;
