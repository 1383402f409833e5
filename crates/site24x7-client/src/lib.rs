// # Site24x7 HTTP Client
//
// This crate implements the `Site24x7Client` trait of `site24x7-core` on
// top of the Site24x7 REST API v2.
//
// ## Features
//
// - Static `Zoho-authtoken` or OAuth2 refresh-token authentication
// - `{"data": ...}` envelope decoding for every collection
// - Error bodies decoded into `Error::Status` with the remote message
// - Retry with exponential backoff for transport failures, 429 and 5xx
//
// ## Security Requirements
//
// - Tokens and client secrets NEVER appear in logs or `Debug` output
// - Credentials come from `ClientConfig` (usually `SITE24X7_*` variables)
//
// ## API Reference
//
// - Site24x7 REST API: https://www.site24x7.com/help/api/
// - Collections: `/monitors`, `/monitor_groups`, `/it_automation`,
//   `/location_profiles`, `/notification_profiles`, `/threshold_profiles`,
//   `/user_groups`

mod auth;
mod collection;
mod http;

pub use collection::HttpCollection;

use site24x7_core::api::{
    ItAutomation, LocationProfile, Monitor, MonitorGroup, NotificationProfile, ThresholdProfile,
    UserGroup,
};
use site24x7_core::traits::{Collection, Listing, Site24x7Client};
use site24x7_core::{ClientConfig, Result};
use std::sync::Arc;
use tracing::info;

use crate::http::Transport;

/// Site24x7 REST client
///
/// All collections share one connection pool and one token cache.
///
/// # Thread Safety
///
/// The client is `Send + Sync`; the OAuth token cache is guarded by an
/// async mutex.
pub struct Site24x7HttpClient {
    transport: Arc<Transport>,
    monitors: HttpCollection<Monitor>,
    monitor_groups: HttpCollection<MonitorGroup>,
    it_automations: HttpCollection<ItAutomation>,
    location_profiles: HttpCollection<LocationProfile>,
    notification_profiles: HttpCollection<NotificationProfile>,
    threshold_profiles: HttpCollection<ThresholdProfile>,
    user_groups: HttpCollection<UserGroup>,
}

impl Site24x7HttpClient {
    /// Create a client from a validated configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Site24x7HttpClient)`: Ready to use; no request is made yet
    /// - `Err(Error::Config)`: Invalid configuration or HTTP client setup failure
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let transport = Arc::new(Transport::new(config)?);
        info!(
            "Site24x7 client for {} ({} auth, {} retries)",
            transport.base_url(),
            config.auth.kind(),
            config.retry.max_retries
        );

        Ok(Self {
            monitors: HttpCollection::new(transport.clone()),
            monitor_groups: HttpCollection::new(transport.clone()),
            it_automations: HttpCollection::new(transport.clone()),
            location_profiles: HttpCollection::new(transport.clone()),
            notification_profiles: HttpCollection::new(transport.clone()),
            threshold_profiles: HttpCollection::new(transport.clone()),
            user_groups: HttpCollection::new(transport.clone()),
            transport,
        })
    }

    /// Create a client from `SITE24X7_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }
}

// Custom Debug implementation that hides the credentials
impl std::fmt::Debug for Site24x7HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site24x7HttpClient")
            .field("transport", &self.transport)
            .finish()
    }
}

impl Site24x7Client for Site24x7HttpClient {
    fn monitors(&self) -> &dyn Collection<Monitor> {
        &self.monitors
    }

    fn monitor_groups(&self) -> &dyn Collection<MonitorGroup> {
        &self.monitor_groups
    }

    fn it_automations(&self) -> &dyn Collection<ItAutomation> {
        &self.it_automations
    }

    fn location_profiles(&self) -> &dyn Listing<LocationProfile> {
        &self.location_profiles
    }

    fn notification_profiles(&self) -> &dyn Listing<NotificationProfile> {
        &self.notification_profiles
    }

    fn threshold_profiles(&self) -> &dyn Listing<ThresholdProfile> {
        &self.threshold_profiles
    }

    fn user_groups(&self) -> &dyn Listing<UserGroup> {
        &self.user_groups
    }
}
