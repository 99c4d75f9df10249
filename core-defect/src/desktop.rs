//! Desktop wiring: reqwest transport and SQLite settings.

use bridge_desktop::{ReqwestHttpClient, SqliteSettingsStore};
use bridge_traits::error::Result;
use core_network::{NetworkConfig, NetworkService};
use core_runtime::config::ParseServerConfig;
use std::path::PathBuf;
use std::sync::Arc;

use crate::bootstrap::DefectDependencies;

/// Dependencies backed by the desktop bridge implementations.
pub async fn desktop_dependencies(
    config: &ParseServerConfig,
    settings_path: PathBuf,
) -> Result<DefectDependencies> {
    let http_client = ReqwestHttpClient::with_timeout(config.request_timeout)?;
    let network_service = NetworkService::new(Arc::new(http_client), NetworkConfig::from(config));
    let settings_store = SqliteSettingsStore::new(settings_path).await?;

    Ok(DefectDependencies::new(
        network_service,
        Arc::new(settings_store),
    ))
}
