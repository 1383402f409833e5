// # Resource Trait
//
// The five-operation lifecycle every resource kind implements on top of a
// remote REST collection.
//
// ## Lifecycle
//
// ```text
// absent ── create ──▶ present ── read / update ──▶ present ── delete ──▶ absent
// ```
//
// ## Usage
//
// ```rust,ignore
// use site24x7_core::{ResourceData, ResourceKind};
//
// let kind = ResourceKind::from_type_name("site24x7_monitor_group")?;
// let resource = kind.resource();
//
// let mut data = ResourceData::new(resource.schema(), attributes)?;
// resource.create(&mut data, &client).await?;
// assert!(!data.id().is_empty());
// ```

use async_trait::async_trait;

use crate::error::Result;
use crate::state::{ResourceData, Schema};
use crate::traits::Site24x7Client;

/// Trait for resource mappers
///
/// A mapper translates between the host's flat [`ResourceData`] and one
/// remote entity, and drives the client for each lifecycle operation.
///
/// # Contract
///
/// - **No retries**: a failed remote call is returned as is; retry and
///   backoff belong to the client.
/// - **No caching**: nothing survives beyond the operation in flight.
/// - **ID after success**: `create` stores the remote ID only once the
///   remote call has succeeded; a failed create leaves the ID empty.
/// - **Idempotent delete**: deleting an absent entity succeeds.
/// - **Three-way exists**: `Ok(true)` found, `Ok(false)` not found,
///   `Err(e)` anything else.
///
/// # Thread Safety
///
/// Mappers are stateless; the host serializes operations per instance.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Host type name, e.g. `site24x7_website_monitor`
    fn type_name(&self) -> &'static str;

    /// Field table used to build and validate [`ResourceData`]
    fn schema(&self) -> &'static Schema;

    /// Create the remote entity and store its ID in `data`
    async fn create(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()>;

    /// Refresh `data` from the remote entity
    async fn read(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()>;

    /// Push `data` to the remote entity identified by `data.id()`
    async fn update(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()>;

    /// Delete the remote entity; not-found counts as success
    async fn delete(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<()>;

    /// Whether the remote entity exists
    async fn exists(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<bool>;
}
