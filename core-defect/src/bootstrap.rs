//! Module creation
//!
//! [`DefectModule::create`] is the only way to obtain a module. It wires the
//! injected dependencies and resolves the module's resource bundle, which is
//! then available process-wide through [`DefectModule::bundle`].

use bridge_traits::analytics::AnalyticsSink;
use bridge_traits::bundle::{BundleLocator, ResourceBundle};
use bridge_traits::scheduler::{ImmediateScheduler, MainScheduler};
use bridge_traits::storage::SettingsStore;
use core_async::dispatch::Dispatcher;
use core_async::runtime::Handle;
use core_network::NetworkService;
use std::sync::{Arc, OnceLock};
use tracing::info;

use crate::facade::DefectModule;
use crate::models::ParseGeoPoint;

/// Module version
pub const VERSION: &str = "1.0.4";

/// Identifier of the module's resource bundle
pub const BUNDLE_PREFIX: &str = "de.osca.defect";

const BUNDLE_MISSING: &str = "Module bundle not initialized!";

static BUNDLE: OnceLock<ResourceBundle> = OnceLock::new();

/// Everything the module needs from its host.
#[derive(Clone)]
pub struct DefectDependencies {
    pub(crate) network_service: NetworkService,
    pub(crate) settings_store: Arc<dyn SettingsStore>,
    pub(crate) default_location: Option<ParseGeoPoint>,
    pub(crate) analytics: Option<Arc<dyn AnalyticsSink>>,
    pub(crate) main_scheduler: Option<Arc<dyn MainScheduler>>,
    pub(crate) worker: Option<Handle>,
}

impl DefectDependencies {
    pub fn new(network_service: NetworkService, settings_store: Arc<dyn SettingsStore>) -> Self {
        Self {
            network_service,
            settings_store,
            default_location: None,
            analytics: None,
            main_scheduler: None,
            worker: None,
        }
    }

    /// Map position to start from when the reporter has not picked one
    pub fn with_default_location(mut self, location: ParseGeoPoint) -> Self {
        self.default_location = Some(location);
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Context results are delivered on. Defaults to inline delivery.
    pub fn with_main_scheduler(mut self, scheduler: Arc<dyn MainScheduler>) -> Self {
        self.main_scheduler = Some(scheduler);
        self
    }

    /// Runtime network work is spawned on. Defaults to the calling runtime.
    pub fn with_worker(mut self, worker: Handle) -> Self {
        self.worker = Some(worker);
        self
    }
}

impl std::fmt::Debug for DefectDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefectDependencies")
            .field("network_service", &self.network_service)
            .field("default_location", &self.default_location)
            .field("analytics", &self.analytics.is_some())
            .field("main_scheduler", &self.main_scheduler.is_some())
            .field("worker", &self.worker.is_some())
            .finish()
    }
}

impl DefectModule {
    /// Create the module from its dependencies.
    ///
    /// # Panics
    ///
    /// - when `bundles` cannot locate the `de.osca.defect` bundle
    /// - when no worker handle is given and the call is made outside a Tokio
    ///   runtime
    pub fn create(dependencies: DefectDependencies, bundles: &dyn BundleLocator) -> Self {
        let bundle = match bundles.locate(BUNDLE_PREFIX) {
            Some(bundle) => bundle,
            None => panic!("{}", BUNDLE_MISSING),
        };
        let bundle = BUNDLE.get_or_init(|| bundle);

        let main = dependencies
            .main_scheduler
            .unwrap_or_else(|| Arc::new(ImmediateScheduler));
        let worker = dependencies.worker.unwrap_or_else(Handle::current);

        info!(
            version = VERSION,
            bundle = %bundle.root().display(),
            base_url = %dependencies.network_service.config().base_url,
            "Defect module created"
        );

        DefectModule {
            network_service: dependencies.network_service,
            settings_store: dependencies.settings_store,
            default_location: dependencies.default_location,
            analytics: dependencies.analytics,
            dispatcher: Dispatcher::new(worker, main),
        }
    }

    /// The module's resource bundle.
    ///
    /// # Panics
    ///
    /// Panics before the first successful [`DefectModule::create`].
    pub fn bundle() -> &'static ResourceBundle {
        match BUNDLE.get() {
            Some(bundle) => bundle,
            None => panic!("{}", BUNDLE_MISSING),
        }
    }
}
