//! Public defect operations
//!
//! Two result conventions:
//!
//! - `get_defect_form_contacts`, `get_parse_config_params`, `send` and
//!   `send_file` always complete; the [`DefectResult`] they yield is the
//!   value to inspect.
//! - `put_defect` returns a [`PutDefect`] future whose error side is meant to
//!   be propagated with `?`.
//!
//! Either way the request runs on the worker runtime and the outcome is
//! handed back through the host's main scheduler. Dropping the returned
//! future cancels the request.

use bridge_traits::analytics::AnalyticsSink;
use bridge_traits::storage::SettingsStore;
use bytes::Bytes;
use core_async::dispatch::Dispatcher;
use core_network::{NetworkService, ParseUploadFileResponse, ParseUploadResponse};
use futures::future::BoxFuture;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, info, instrument, warn};

use crate::bootstrap::{BUNDLE_PREFIX, VERSION};
use crate::error::{DefectError, DefectResult};
use crate::events::DefectEvent;
use crate::models::{FormContact, FormData, ParseConfig, ParseGeoPoint};
use crate::resources;
use crate::session::SessionHeaderPolicy;

/// Contact limit used by [`DefectModule::get_all_defect_form_contacts`]
pub const DEFAULT_CONTACT_LIMIT: u32 = 1000;

/// The defect module. Created through [`DefectModule::create`].
#[derive(Clone)]
pub struct DefectModule {
    pub(crate) network_service: NetworkService,
    pub(crate) settings_store: Arc<dyn SettingsStore>,
    pub(crate) default_location: Option<ParseGeoPoint>,
    pub(crate) analytics: Option<Arc<dyn AnalyticsSink>>,
    pub(crate) dispatcher: Dispatcher,
}

impl DefectModule {
    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn bundle_prefix(&self) -> &'static str {
        BUNDLE_PREFIX
    }

    pub fn default_location(&self) -> Option<ParseGeoPoint> {
        self.default_location
    }

    pub fn settings_store(&self) -> &Arc<dyn SettingsStore> {
        &self.settings_store
    }

    /// Fetch up to `limit` form contacts. `limit` replaces any `limit` entry
    /// in `query`.
    #[instrument(skip(self, query))]
    pub async fn get_defect_form_contacts(
        &self,
        limit: u32,
        query: BTreeMap<String, String>,
    ) -> DefectResult<Vec<FormContact>> {
        let mut query = query;
        query.insert("limit".to_string(), limit.to_string());

        let service = self.network_service.clone();
        let store = Arc::clone(&self.settings_store);
        let result = self
            .deliver(async move {
                let headers =
                    SessionHeaderPolicy::headers(&service.config().headers, store.as_ref()).await;
                let resource =
                    resources::contact_fetch(service.config().base_url.clone(), headers, query);
                service.download(&resource).await.map_err(DefectError::from)
            })
            .await;

        match &result {
            Ok(contacts) => debug!(count = contacts.len(), "Fetched form contacts"),
            Err(e) => warn!(error = %e, "Fetching form contacts failed"),
        }
        result
    }

    /// [`get_defect_form_contacts`](Self::get_defect_form_contacts) with the
    /// default limit and no extra query.
    pub async fn get_all_defect_form_contacts(&self) -> DefectResult<Vec<FormContact>> {
        self.get_defect_form_contacts(DEFAULT_CONTACT_LIMIT, BTreeMap::new())
            .await
    }

    /// Fetch the server config parameters.
    #[instrument(skip(self))]
    pub async fn get_parse_config_params(&self) -> DefectResult<ParseConfig> {
        let service = self.network_service.clone();
        let store = Arc::clone(&self.settings_store);
        let result = self
            .deliver(async move {
                let headers =
                    SessionHeaderPolicy::headers(&service.config().headers, store.as_ref()).await;
                let resource = resources::config_fetch(service.config().base_url.clone(), headers);
                service.download(&resource).await.map_err(DefectError::from)
            })
            .await;

        if let Err(e) = &result {
            warn!(error = %e, "Fetching config failed");
        }
        result
    }

    /// Submit a defect report.
    #[instrument(skip(self, form))]
    pub async fn send(&self, form: FormData) -> DefectResult<ParseUploadResponse> {
        self.deliver(self.upload_form(form)).await
    }

    /// Upload a defect photo as `defect.jpg`.
    #[instrument(skip(self, file), fields(bytes = file.len()))]
    pub async fn send_file(&self, file: Bytes) -> DefectResult<ParseUploadFileResponse> {
        let service = self.network_service.clone();
        let store = Arc::clone(&self.settings_store);
        let result = self
            .deliver(async move {
                let headers =
                    SessionHeaderPolicy::headers(&service.config().headers, store.as_ref()).await;
                let resource =
                    resources::file_upload(service.config().base_url.clone(), headers, Some(file));
                service.upload(&resource).await.map_err(DefectError::from)
            })
            .await;

        match &result {
            Ok(uploaded) => info!(name = %uploaded.name, "Defect photo uploaded"),
            Err(e) => warn!(error = %e, "Defect photo upload failed"),
        }
        result
    }

    /// Submit a defect report, failing with a [`DefectError`].
    pub fn put_defect(&self, form: FormData) -> PutDefect {
        let dispatcher = self.dispatcher.clone();
        let upload = self.upload_form(form);

        PutDefect {
            inner: Box::pin(async move {
                dispatcher.dispatch(upload).await.unwrap_or_else(|e| {
                    warn!(error = %e, "Defect submission was not delivered");
                    Err(DefectError::Unknown)
                })
            }),
        }
    }

    /// Worker-side report upload, including the analytics hook.
    fn upload_form(
        &self,
        form: FormData,
    ) -> impl Future<Output = DefectResult<ParseUploadResponse>> + Send + 'static {
        let service = self.network_service.clone();
        let store = Arc::clone(&self.settings_store);
        let analytics = self.analytics.clone();

        async move {
            let headers =
                SessionHeaderPolicy::headers(&service.config().headers, store.as_ref()).await;
            let resource =
                resources::data_upload(service.config().base_url.clone(), headers, Some(form));
            let result = service.upload(&resource).await.map_err(DefectError::from);

            let event = match &result {
                Ok(ack) => {
                    info!(object_id = %ack.object_id, "Defect report submitted");
                    DefectEvent::Submitted {
                        object_id: ack.object_id.clone(),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Defect report submission failed");
                    DefectEvent::failed(e)
                }
            };
            if let Some(analytics) = analytics {
                if let Err(e) = analytics.track(event.to_analytics_event()).await {
                    warn!(error = %e, event = event.name(), "Analytics tracking failed");
                }
            }

            result
        }
    }

    /// Run `work` on the worker and deliver its result on the main context.
    /// A result lost on the way surfaces as [`DefectError::Unknown`].
    async fn deliver<T, F>(&self, work: F) -> DefectResult<T>
    where
        F: Future<Output = DefectResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.dispatcher.dispatch(work).await.unwrap_or_else(|e| {
            warn!(error = %e, "Result was not delivered");
            Err(DefectError::Unknown)
        })
    }
}

impl std::fmt::Debug for DefectModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefectModule")
            .field("version", &VERSION)
            .field("network_service", &self.network_service)
            .field("default_location", &self.default_location)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

/// Pending [`DefectModule::put_defect`] submission.
#[must_use = "futures do nothing unless awaited"]
pub struct PutDefect {
    inner: BoxFuture<'static, Result<ParseUploadResponse, DefectError>>,
}

impl Future for PutDefect {
    type Output = Result<ParseUploadResponse, DefectError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl std::fmt::Debug for PutDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PutDefect").finish_non_exhaustive()
    }
}
