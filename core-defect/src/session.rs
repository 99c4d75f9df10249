//! Session token header policy

use bridge_traits::storage::SettingsStore;
use core_runtime::logging::redact_if_sensitive;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Settings key under which the host app stores the logged-in session token
pub const SESSION_TOKEN_KEY: &str = "SessionToken";

/// Header carrying the session token
pub const SESSION_TOKEN_HEADER: &str = "X-Parse-Session-Token";

/// Computes the headers for a single request.
pub struct SessionHeaderPolicy;

impl SessionHeaderPolicy {
    /// `base` plus `X-Parse-Session-Token` when the store holds a non-empty
    /// token. Never fails: an unreadable store counts as "no token".
    pub async fn headers(
        base: &BTreeMap<String, String>,
        store: &dyn SettingsStore,
    ) -> BTreeMap<String, String> {
        let mut headers = base.clone();

        match store.get_string(SESSION_TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => {
                debug!(
                    token = %redact_if_sensitive(SESSION_TOKEN_KEY, &token),
                    "Attaching session token"
                );
                headers.insert(SESSION_TOKEN_HEADER.to_string(), token);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Session token unreadable, continuing without it");
            }
        }

        headers
    }
}
