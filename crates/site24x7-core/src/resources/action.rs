//! Action (`site24x7_action`)
//!
//! Host-side name for an IT automation: a URL the service calls when a
//! monitor changes status. Field names differ from the wire names, so the
//! mapping is spelled out in [`ActionResource::build`] and
//! [`ActionResource::apply`].

use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::ItAutomation;
use crate::error::Result;
use crate::state::{Field, FieldDefault, FieldKind, ResourceData, Schema};
use crate::traits::{Resource, Site24x7Client};

const TYPE_NAME: &str = "site24x7_action";

const FIELDS: &[Field] = &[
    Field::required("name", FieldKind::String),
    Field::required("url", FieldKind::String),
    Field::defaulted("method", FieldKind::String, FieldDefault::Str("P")),
    Field::defaulted("timeout", FieldKind::Int, FieldDefault::Int(30)),
    Field::defaulted("type", FieldKind::Int, FieldDefault::Int(1)),
    Field::optional("custom_parameters", FieldKind::String),
    Field::defaulted(
        "requires_authentication",
        FieldKind::Bool,
        FieldDefault::Bool(false),
    ),
    Field::defaulted(
        "send_custom_parameters",
        FieldKind::Bool,
        FieldDefault::Bool(false),
    ),
    Field::defaulted("send_in_json_format", FieldKind::Bool, FieldDefault::Bool(true)),
    Field::defaulted(
        "send_incident_parameters",
        FieldKind::Bool,
        FieldDefault::Bool(true),
    ),
];

static SCHEMA: Schema = Schema {
    type_name: TYPE_NAME,
    fields: FIELDS,
};

/// Maps `site24x7_action` onto `/it_automation`
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionResource;

impl ActionResource {
    /// Build the outbound entity; `custom_parameters` is only sent when set
    pub fn build(data: &ResourceData) -> ItAutomation {
        ItAutomation {
            action_id: data.id().to_string(),
            action_name: data.get_str("name").to_string(),
            action_type: data.get_int("type"),
            action_method: data.get_str("method").to_string(),
            action_url: data.get_str("url").to_string(),
            action_timeout: data.get_int("timeout"),
            custom_parameters: data
                .get_ok("custom_parameters")
                .then(|| data.get_str("custom_parameters").to_string()),
            requires_authentication: data.get_bool("requires_authentication"),
            send_custom_parameters: data.get_bool("send_custom_parameters"),
            send_in_json_format: data.get_bool("send_in_json_format"),
            send_incident_parameters: data.get_bool("send_incident_parameters"),
        }
    }

    pub fn apply(data: &mut ResourceData, action: &ItAutomation) {
        data.set("name", action.action_name.clone());
        data.set("type", action.action_type);
        data.set("method", action.action_method.clone());
        data.set("url", action.action_url.clone());
        data.set("timeout", action.action_timeout);
        data.set(
            "custom_parameters",
            action.custom_parameters.clone().unwrap_or_default(),
        );
        data.set("requires_authentication", action.requires_authentication);
        data.set("send_custom_parameters", action.send_custom_parameters);
        data.set("send_in_json_format", action.send_in_json_format);
        data.set("send_incident_parameters", action.send_incident_parameters);
    }
}

#[async_trait]
impl Resource for ActionResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    async fn create(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let action = ItAutomation {
            action_id: String::new(),
            ..Self::build(data)
        };

        debug!("Creating action: {:?}", action);
        let created = client.it_automations().create(&action).await?;
        super::store_created_id(data, &created)?;

        info!("Created action {} ({})", created.action_id, action.action_name);
        Ok(())
    }

    async fn read(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let id = super::require_id(data, TYPE_NAME)?;
        let action = client.it_automations().get(id).await?;

        Self::apply(data, &action);
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        super::require_id(data, TYPE_NAME)?;
        let action = Self::build(data);

        debug!("Updating action: {:?}", action);
        let updated = client.it_automations().update(&action).await?;

        info!("Updated action {}", action.action_id);
        super::restore_id(data, &updated.action_id);
        Ok(())
    }

    async fn delete(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let id = super::require_id(data, TYPE_NAME)?;
        info!("Deleting action {}", id);
        super::delete_idempotent(client.it_automations(), id).await
    }

    async fn exists(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<bool> {
        let id = super::require_id(data, TYPE_NAME)?;
        super::exists_in(client.it_automations(), id).await
    }
}
