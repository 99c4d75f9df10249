//! Directory-based resource bundles

use bridge_traits::bundle::{BundleLocator, ResourceBundle};
use std::path::PathBuf;
use tracing::debug;

/// Resolves bundle `<identifier>` to the directory `<root>/<identifier>`.
#[derive(Debug, Clone)]
pub struct FsBundleLocator {
    root: PathBuf,
}

impl FsBundleLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl Default for FsBundleLocator {
    /// Bundles below the platform data directory (`~/.local/share/osca/bundles`
    /// on Linux).
    fn default() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("osca")
            .join("bundles");
        Self::new(root)
    }
}

impl BundleLocator for FsBundleLocator {
    fn locate(&self, identifier: &str) -> Option<ResourceBundle> {
        let path = self.root.join(identifier);
        if path.is_dir() {
            debug!(identifier = identifier, path = ?path, "Located bundle");
            Some(ResourceBundle::new(identifier, path))
        } else {
            debug!(identifier = identifier, path = ?path, "Bundle directory missing");
            None
        }
    }
}
