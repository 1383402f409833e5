//! Monitor group (`site24x7_monitor_group`)

use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::MonitorGroup;
use crate::error::Result;
use crate::state::{Field, FieldKind, ResourceData, Schema};
use crate::traits::{Resource, Site24x7Client};

const TYPE_NAME: &str = "site24x7_monitor_group";

const FIELDS: &[Field] = &[
    Field::required("display_name", FieldKind::String),
    Field::required("description", FieldKind::String),
];

static SCHEMA: Schema = Schema {
    type_name: TYPE_NAME,
    fields: FIELDS,
};

/// Maps `site24x7_monitor_group` onto `/monitor_groups`
#[derive(Debug, Clone, Copy, Default)]
pub struct MonitorGroupResource;

impl MonitorGroupResource {
    pub fn build(data: &ResourceData) -> MonitorGroup {
        MonitorGroup {
            group_id: data.id().to_string(),
            display_name: data.get_str("display_name").to_string(),
            description: data.get_str("description").to_string(),
        }
    }

    pub fn apply(data: &mut ResourceData, group: &MonitorGroup) {
        data.set("display_name", group.display_name.clone());
        data.set("description", group.description.clone());
    }
}

#[async_trait]
impl Resource for MonitorGroupResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    async fn create(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let group = MonitorGroup {
            group_id: String::new(),
            ..Self::build(data)
        };

        debug!("Creating monitor group: {:?}", group);
        let created = client.monitor_groups().create(&group).await?;
        super::store_created_id(data, &created)?;

        info!(
            "Created monitor group {} ({})",
            created.group_id, group.display_name
        );
        Ok(())
    }

    async fn read(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let id = super::require_id(data, TYPE_NAME)?;
        let group = client.monitor_groups().get(id).await?;

        Self::apply(data, &group);
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        super::require_id(data, TYPE_NAME)?;
        let group = Self::build(data);

        debug!("Updating monitor group: {:?}", group);
        let updated = client.monitor_groups().update(&group).await?;

        info!("Updated monitor group {}", group.group_id);
        super::restore_id(data, &updated.group_id);
        Ok(())
    }

    async fn delete(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let id = super::require_id(data, TYPE_NAME)?;
        info!("Deleting monitor group {}", id);
        super::delete_idempotent(client.monitor_groups(), id).await
    }

    async fn exists(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<bool> {
        let id = super::require_id(data, TYPE_NAME)?;
        super::exists_in(client.monitor_groups(), id).await
    }
}
