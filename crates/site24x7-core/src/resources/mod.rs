//! Resource mappers
//!
//! One mapper per resource kind, each implementing [`Resource`]. The set of
//! kinds is closed; [`ResourceKind`] maps host type names to mappers
//! without a runtime registry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use site24x7_core::ResourceKind;
//!
//! let kind = ResourceKind::from_type_name("site24x7_action")?;
//! let exists = kind.resource().exists(&data, &client).await?;
//! ```

pub mod action;
pub mod dns_monitor;
pub mod monitor;
pub mod monitor_group;
pub mod website_monitor;

pub use action::ActionResource;
pub use dns_monitor::DnsMonitorResource;
pub use monitor_group::MonitorGroupResource;
pub use website_monitor::WebsiteMonitorResource;

use tracing::debug;

use crate::api::Entity;
use crate::error::{Error, Result};
use crate::state::ResourceData;
use crate::traits::{Collection, Resource};

/// Resource kinds managed by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    WebsiteMonitor,
    DnsMonitor,
    MonitorGroup,
    Action,
}

impl ResourceKind {
    /// Every kind, in registration order
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::WebsiteMonitor,
        ResourceKind::DnsMonitor,
        ResourceKind::MonitorGroup,
        ResourceKind::Action,
    ];

    /// Look up a kind by its host type name
    pub fn from_type_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
            .ok_or_else(|| Error::config(format!("Unknown resource type: {}", name)))
    }

    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::WebsiteMonitor => "site24x7_website_monitor",
            ResourceKind::DnsMonitor => "site24x7_dns_monitor",
            ResourceKind::MonitorGroup => "site24x7_monitor_group",
            ResourceKind::Action => "site24x7_action",
        }
    }

    /// The mapper implementing this kind
    pub fn resource(self) -> &'static dyn Resource {
        match self {
            ResourceKind::WebsiteMonitor => &WebsiteMonitorResource,
            ResourceKind::DnsMonitor => &DnsMonitorResource,
            ResourceKind::MonitorGroup => &MonitorGroupResource,
            ResourceKind::Action => &ActionResource,
        }
    }
}

/// The instance ID, or an error for operations that need one
pub(crate) fn require_id<'a>(data: &'a ResourceData, type_name: &str) -> Result<&'a str> {
    match data.id() {
        "" => Err(Error::invalid_input(format!(
            "{}: operation requires an ID",
            type_name
        ))),
        id => Ok(id),
    }
}

/// Delete by ID, treating not-found as already deleted
pub(crate) async fn delete_idempotent<T: Entity>(
    collection: &dyn Collection<T>,
    id: &str,
) -> Result<()> {
    match collection.delete(id).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            debug!("{} {} already absent", T::KIND, id);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Three-way existence check through `get`
pub(crate) async fn exists_in<T: Entity>(collection: &dyn Collection<T>, id: &str) -> Result<bool> {
    match collection.get(id).await {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Store the ID assigned by a create.
///
/// An empty echo is a decode error and leaves `data` without an ID.
pub(crate) fn store_created_id<T: Entity>(data: &mut ResourceData, created: &T) -> Result<()> {
    if created.id().is_empty() {
        return Err(Error::decode(T::KIND, "create response carried no ID"));
    }
    data.set_id(created.id());
    Ok(())
}

/// Store an ID echoed by an update; an empty echo keeps the current one
pub(crate) fn restore_id(data: &mut ResourceData, echoed: &str) {
    if !echoed.is_empty() {
        data.set_id(echoed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_type_name(kind.type_name()).unwrap(), kind);
            assert_eq!(kind.resource().type_name(), kind.type_name());
            assert_eq!(kind.resource().schema().type_name, kind.type_name());
        }
    }

    #[test]
    fn test_unknown_type_name() {
        let err = ResourceKind::from_type_name("site24x7_server_monitor").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_require_id() {
        let data = ResourceData::default();
        assert!(require_id(&data, "x").is_err());

        let data = ResourceData::default().with_id("7");
        assert_eq!(require_id(&data, "x").unwrap(), "7");
    }
}
