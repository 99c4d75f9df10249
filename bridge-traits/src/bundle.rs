//! Static Resource Bundles
//!
//! Modules ship static resources (localized strings, defaults, images) in a
//! bundle identified by a reverse-DNS string such as `de.osca.defect`. The
//! host knows where bundles live; the core only asks for them by identifier.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A located resource bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
    identifier: String,
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new(identifier: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            root: root.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a named resource inside the bundle. Existence is not checked.
    pub fn resource_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// Bundle lookup trait
///
/// Lookup is synchronous: it runs once while a module is being constructed.
pub trait BundleLocator: Send + Sync {
    /// Locate the bundle with the given identifier
    fn locate(&self, identifier: &str) -> Option<ResourceBundle>;
}

/// Locator backed by an explicit identifier → root table.
///
/// Useful for hosts that embed bundles at known locations and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticBundleLocator {
    bundles: HashMap<String, PathBuf>,
}

impl StaticBundleLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(mut self, identifier: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.bundles.insert(identifier.into(), root.into());
        self
    }
}

impl BundleLocator for StaticBundleLocator {
    fn locate(&self, identifier: &str) -> Option<ResourceBundle> {
        self.bundles
            .get(identifier)
            .map(|root| ResourceBundle::new(identifier, root.clone()))
    }
}
