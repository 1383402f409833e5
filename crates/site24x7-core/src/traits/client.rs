// # Site24x7 Client Traits
//
// Defines the interface the resource mappers use to reach the REST API.
//
// ## Implementations
//
// - HTTP: `site24x7-client` crate
// - Tests: scripted fakes under `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use site24x7_core::Site24x7Client;
//
// async fn print_monitor(client: &dyn Site24x7Client) -> site24x7_core::Result<()> {
//     let monitor = client.monitors().get("113770000041271035").await?;
//     println!("{}", monitor.display_name);
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::api::{
    Entity, ItAutomation, LocationProfile, Monitor, MonitorGroup, NotificationProfile,
    ThresholdProfile, UserGroup,
};
use crate::error::Result;

/// CRUD access to one remote collection
///
/// # Status codes
///
/// HTTP implementations expect `201` for `create` and `200` for everything
/// else. Any other status surfaces as [`crate::Error::Status`]; a missing
/// entity is a status error with code 404 (see
/// [`crate::Error::is_not_found`]).
///
/// # Retries
///
/// Implementations own authentication and retry/backoff. Callers never
/// retry.
#[async_trait]
pub trait Collection<T: Entity>: Send + Sync {
    /// Create the entity; the returned copy carries the remote-assigned ID
    async fn create(&self, entity: &T) -> Result<T>;

    /// Fetch one entity by ID
    async fn get(&self, id: &str) -> Result<T>;

    /// Replace the entity addressed by `entity.id()`
    async fn update(&self, entity: &T) -> Result<T>;

    /// Delete one entity by ID
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Read-only listing of a remote collection
#[async_trait]
pub trait Listing<T: Entity>: Send + Sync {
    /// List all entities in the order the API returns them
    async fn list(&self) -> Result<Vec<T>>;
}

/// Handle to the Site24x7 API, passed explicitly into every mapper call
///
/// # Thread Safety
///
/// One handle is shared across all operations; implementations must be
/// safe to reuse concurrently.
pub trait Site24x7Client: Send + Sync {
    fn monitors(&self) -> &dyn Collection<Monitor>;

    fn monitor_groups(&self) -> &dyn Collection<MonitorGroup>;

    fn it_automations(&self) -> &dyn Collection<ItAutomation>;

    fn location_profiles(&self) -> &dyn Listing<LocationProfile>;

    fn notification_profiles(&self) -> &dyn Listing<NotificationProfile>;

    fn threshold_profiles(&self) -> &dyn Listing<ThresholdProfile>;

    fn user_groups(&self) -> &dyn Listing<UserGroup>;
}
