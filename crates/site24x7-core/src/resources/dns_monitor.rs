//! DNS monitor (`site24x7_dns_monitor`)

use async_trait::async_trait;

use super::monitor;
use crate::api::monitor::MONITOR_TYPE_DNS;
use crate::api::Monitor;
use crate::error::Result;
use crate::state::{Field, FieldDefault, FieldKind, ResourceData, Schema};
use crate::traits::{Resource, Site24x7Client};

const TYPE_NAME: &str = "site24x7_dns_monitor";

const FIELDS: &[Field] = &[
    Field::required("display_name", FieldKind::String),
    Field::required("dns_host", FieldKind::String),
    Field::defaulted("dns_port", FieldKind::Int, FieldDefault::Int(53)),
    Field::required("domain_name", FieldKind::String),
    Field::defaulted("check_frequency", FieldKind::Int, FieldDefault::Int(1)),
    Field::defaulted("timeout", FieldKind::Int, FieldDefault::Int(10)),
    Field::optional("location_profile_id", FieldKind::String),
    Field::optional("notification_profile_id", FieldKind::String),
    Field::optional("threshold_profile_id", FieldKind::String),
    Field::optional("monitor_groups", FieldKind::StringList),
    Field::optional("user_group_ids", FieldKind::StringList),
    Field::optional("actions", FieldKind::StringMap),
];

static SCHEMA: Schema = Schema {
    type_name: TYPE_NAME,
    fields: FIELDS,
};

/// Maps `site24x7_dns_monitor` onto `/monitors` entities of type `DNS`
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsMonitorResource;

impl DnsMonitorResource {
    /// Build the outbound entity; the port travels as a string
    pub fn build(data: &ResourceData) -> Result<Monitor> {
        let mut m = monitor::common_entity(data, MONITOR_TYPE_DNS)?;

        m.dns_host = Some(data.get_str("dns_host").to_string());
        m.dns_port = Some(data.get_int("dns_port").to_string());
        m.domain_name = Some(data.get_str("domain_name").to_string());

        Ok(m)
    }

    /// Overwrite `data` with a fetched monitor
    pub fn apply(data: &mut ResourceData, m: &Monitor) -> Result<()> {
        monitor::read_common(data, m)?;

        data.set("dns_host", m.dns_host.clone().unwrap_or_default());
        if let Some(port) = m.dns_port.as_deref().filter(|p| !p.is_empty()) {
            data.set("dns_port", monitor::parse_int("dns_port", port)?);
        }
        data.set("domain_name", m.domain_name.clone().unwrap_or_default());

        Ok(())
    }
}

#[async_trait]
impl Resource for DnsMonitorResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    async fn create(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let m = Self::build(data)?;
        monitor::submit_create(m, data, client).await
    }

    async fn read(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let m = monitor::fetch(data, client, TYPE_NAME).await?;
        Self::apply(data, &m)
    }

    async fn update(&self, data: &mut ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        let m = Self::build(data)?;
        monitor::submit_update(m, data, client, TYPE_NAME).await
    }

    async fn delete(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<()> {
        monitor::delete(data, client, TYPE_NAME).await
    }

    async fn exists(&self, data: &ResourceData, client: &dyn Site24x7Client) -> Result<bool> {
        monitor::exists(data, client, TYPE_NAME).await
    }
}
