//! Submit a defect report against a real Parse server.
//!
//! Run with:
//! ```bash
//! export PARSE_BASE_URL=https://parse-dev.example.org/parse
//! export PARSE_APPLICATION_ID=...
//! export PARSE_CLIENT_KEY=...
//! cargo run -p core-defect --example report_defect --features desktop-shims -- /path/to/bundles
//! ```

use bridge_desktop::FsBundleLocator;
use core_defect::desktop::desktop_dependencies;
use core_defect::{DefectModule, FormData, ParseGeoPoint};
use core_runtime::config::ParseServerConfig;
use core_runtime::logging::{init_logging, LoggingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default())?;

    let config = ParseServerConfig::from_env()?;
    let bundles = match std::env::args().nth(1) {
        Some(root) => FsBundleLocator::new(root),
        None => FsBundleLocator::default(),
    };
    let settings_path = std::env::temp_dir().join("osca-defect").join("settings.db");

    let deps = desktop_dependencies(&config, settings_path).await?;
    let module = DefectModule::create(deps, &bundles);
    info!(version = module.version(), "Module ready");

    let contacts = match module.get_all_defect_form_contacts().await {
        Ok(contacts) => contacts,
        Err(e) => {
            error!(error = %e, "Could not load contacts");
            return Ok(());
        }
    };
    for contact in &contacts {
        info!(title = ?contact.title, position = ?contact.position, "Contact");
    }

    let Some(contact_id) = contacts.first().and_then(|c| c.object_id()) else {
        info!("No contacts configured, nothing to report");
        return Ok(());
    };

    let report = FormData::new()
        .with_message("Test report from the desktop demo")
        .with_contact_id(contact_id)
        .with_geopoint(ParseGeoPoint::new(51.161964, 7.079082));

    let ack = module.put_defect(report).await?;
    info!(object_id = %ack.object_id, created_at = %ack.created_at, "Report submitted");
    Ok(())
}
