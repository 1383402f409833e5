//! Behavior shared by website and DNS monitors
//!
//! Both kinds live in the `/monitors` collection, carry the same profile
//! references and map their `actions` field the same way, so delete,
//! exists, default resolution and the common read-back live here.

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::api::{ActionRef, Header, Monitor, Status, ValueAndSeverity};
use crate::defaults;
use crate::error::{Error, Result};
use crate::state::ResourceData;
use crate::traits::Site24x7Client;

/// Turn the `actions` map into action references, ordered by key.
///
/// Fails locally when a key is not a known numeric status.
pub(crate) fn action_refs(data: &ResourceData) -> Result<Vec<ActionRef>> {
    data.get_str_map("actions")
        .into_iter()
        .map(|(severity, action_id)| -> Result<ActionRef> {
            Ok(ActionRef {
                alert_type: severity.parse()?,
                action_id,
            })
        })
        .collect()
}

/// Rebuild the `actions` map from action references
pub(crate) fn actions_map(refs: &[ActionRef]) -> BTreeMap<String, String> {
    refs.iter()
        .map(|r| (r.alert_type.to_string(), r.action_id.clone()))
        .collect()
}

/// Turn the `custom_headers` map into headers, ordered by name
pub(crate) fn custom_headers(data: &ResourceData) -> Vec<Header> {
    data.get_str_map("custom_headers")
        .into_iter()
        .map(|(name, value)| Header { name, value })
        .collect()
}

/// Rebuild the `custom_headers` map; unnamed headers are dropped
pub(crate) fn headers_map(headers: &[Header]) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter(|h| !h.name.is_empty())
        .map(|h| (h.name.clone(), h.value.clone()))
        .collect()
}

/// A `{value, severity}` rule, present only when the value field is non-empty
pub(crate) fn match_rule(
    data: &ResourceData,
    value_key: &str,
    severity_key: &str,
) -> Result<Option<ValueAndSeverity>> {
    if !data.get_ok(value_key) {
        return Ok(None);
    }

    let code = data.get_int(severity_key);
    let severity = Status::known(code).map_err(|_| {
        Error::invalid_input(format!("{}: unknown monitor status {}", severity_key, code))
    })?;

    Ok(Some(ValueAndSeverity {
        value: data.get_str(value_key).to_string(),
        severity,
    }))
}

/// Non-empty string field as `Some`, otherwise `None`
pub(crate) fn optional_str(data: &ResourceData, key: &str) -> Option<String> {
    data.get_ok(key).then(|| data.get_str(key).to_string())
}

/// Parse a numeric string echoed by the API
pub(crate) fn parse_int(field: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::decode(format!("monitor field {}", field), e))
}

/// Fill every empty profile reference from the default-resolver.
///
/// Resolved IDs are written to both the outbound entity and `data`, so
/// later operations see a stable value.
pub(crate) async fn resolve_defaults(
    monitor: &mut Monitor,
    data: &mut ResourceData,
    client: &dyn Site24x7Client,
) -> Result<()> {
    if monitor.location_profile_id.is_empty() {
        let profile = defaults::default_location_profile(client).await?;
        monitor.location_profile_id = profile.profile_id;
        data.set("location_profile_id", monitor.location_profile_id.clone());
    }
    if monitor.notification_profile_id.is_empty() {
        let profile = defaults::default_notification_profile(client).await?;
        monitor.notification_profile_id = profile.profile_id;
        data.set(
            "notification_profile_id",
            monitor.notification_profile_id.clone(),
        );
    }
    if monitor.threshold_profile_id.is_empty() {
        let profile = defaults::default_threshold_profile(client).await?;
        monitor.threshold_profile_id = profile.profile_id;
        data.set("threshold_profile_id", monitor.threshold_profile_id.clone());
    }
    if monitor.user_group_ids.is_empty() {
        let group = defaults::default_user_group(client).await?;
        monitor.user_group_ids = vec![group.user_group_id];
        data.set("user_group_ids", monitor.user_group_ids.clone());
    }

    Ok(())
}

/// Populate the entity fields every monitor kind shares
pub(crate) fn common_entity(data: &ResourceData, monitor_type: &str) -> Result<Monitor> {
    Ok(Monitor {
        display_name: data.get_str("display_name").to_string(),
        monitor_type: monitor_type.to_string(),
        check_frequency: data.get_int("check_frequency").to_string(),
        timeout: data.get_int("timeout"),
        location_profile_id: data.get_str("location_profile_id").to_string(),
        notification_profile_id: data.get_str("notification_profile_id").to_string(),
        threshold_profile_id: data.get_str("threshold_profile_id").to_string(),
        monitor_groups: data.get_str_list("monitor_groups"),
        user_group_ids: data.get_str_list("user_group_ids"),
        action_ids: action_refs(data)?,
        ..Default::default()
    })
}

/// Write the shared fields of a fetched monitor back into `data`
pub(crate) fn read_common(data: &mut ResourceData, monitor: &Monitor) -> Result<()> {
    data.set("display_name", monitor.display_name.clone());
    // an empty echo keeps the stored frequency
    if !monitor.check_frequency.is_empty() {
        data.set(
            "check_frequency",
            parse_int("check_frequency", &monitor.check_frequency)?,
        );
    }
    data.set("timeout", monitor.timeout);
    data.set("location_profile_id", monitor.location_profile_id.clone());
    data.set(
        "notification_profile_id",
        monitor.notification_profile_id.clone(),
    );
    data.set("threshold_profile_id", monitor.threshold_profile_id.clone());
    data.set("monitor_groups", monitor.monitor_groups.clone());
    data.set("user_group_ids", monitor.user_group_ids.clone());
    data.set_str_map("actions", actions_map(&monitor.action_ids));
    Ok(())
}

/// Submit a new monitor and store its ID once the API confirmed it
pub(crate) async fn submit_create(
    mut monitor: Monitor,
    data: &mut ResourceData,
    client: &dyn Site24x7Client,
) -> Result<()> {
    resolve_defaults(&mut monitor, data, client).await?;

    debug!("Creating monitor: {:?}", monitor);
    let created = client.monitors().create(&monitor).await?;
    super::store_created_id(data, &created)?;

    info!(
        "Created {} monitor {} ({})",
        monitor.monitor_type, created.monitor_id, monitor.display_name
    );
    Ok(())
}

/// Submit an existing monitor under its current ID
pub(crate) async fn submit_update(
    mut monitor: Monitor,
    data: &mut ResourceData,
    client: &dyn Site24x7Client,
    type_name: &str,
) -> Result<()> {
    monitor.monitor_id = super::require_id(data, type_name)?.to_string();
    resolve_defaults(&mut monitor, data, client).await?;

    debug!("Updating monitor: {:?}", monitor);
    let updated = client.monitors().update(&monitor).await?;

    info!("Updated monitor {}", monitor.monitor_id);
    super::restore_id(data, &updated.monitor_id);
    Ok(())
}

/// Fetch the monitor behind `data`
pub(crate) async fn fetch(
    data: &ResourceData,
    client: &dyn Site24x7Client,
    type_name: &str,
) -> Result<Monitor> {
    let id = super::require_id(data, type_name)?;
    debug!("Reading monitor {}", id);
    client.monitors().get(id).await
}

pub(crate) async fn delete(
    data: &ResourceData,
    client: &dyn Site24x7Client,
    type_name: &str,
) -> Result<()> {
    let id = super::require_id(data, type_name)?;
    info!("Deleting monitor {}", id);
    super::delete_idempotent(client.monitors(), id).await
}

pub(crate) async fn exists(
    data: &ResourceData,
    client: &dyn Site24x7Client,
    type_name: &str,
) -> Result<bool> {
    let id = super::require_id(data, type_name)?;
    super::exists_in(client.monitors(), id).await
}
