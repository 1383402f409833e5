//! Website monitor (`site24x7_website_monitor`)

use async_trait::async_trait;

use super::monitor;
use crate::api::monitor::MONITOR_TYPE_URL;
use crate::api::{Monitor, ValueAndSeverity};
use crate::error::Result;
use crate::state::{Field, FieldDefault, FieldKind, ResourceData, Schema};
use crate::traits::{Resource, Site24x7Client};

const TYPE_NAME: &str = "site24x7_website_monitor";

const FIELDS: &[Field] = &[
    Field::required("display_name", FieldKind::String),
    Field::required("website", FieldKind::String),
    Field::defaulted("check_frequency", FieldKind::Int, FieldDefault::Int(1)),
    Field::defaulted("http_method", FieldKind::String, FieldDefault::Str("G")),
    Field::optional("auth_user", FieldKind::String),
    Field::optional("auth_pass", FieldKind::String),
    // empty keyword values disable the rule instead of auto-detecting one
    Field::defaulted("matching_keyword_value", FieldKind::String, FieldDefault::Str("")),
    Field::defaulted("matching_keyword_severity", FieldKind::Int, FieldDefault::Int(2)),
    Field::defaulted("unmatching_keyword_value", FieldKind::String, FieldDefault::Str("")),
    Field::defaulted("unmatching_keyword_severity", FieldKind::Int, FieldDefault::Int(2)),
    Field::optional("match_regex_value", FieldKind::String),
    Field::defaulted("match_regex_severity", FieldKind::Int, FieldDefault::Int(2)),
    Field::defaulted("match_case", FieldKind::Bool, FieldDefault::Bool(false)),
    Field::optional("user_agent", FieldKind::String),
    Field::optional("custom_headers", FieldKind::StringMap),
    Field::defaulted("timeout", FieldKind::Int, FieldDefault::Int(10)),
    Field::optional("location_profile_id", FieldKind::String),
    Field::optional("notification_profile_id", FieldKind::String),
    Field::optional("threshold_profile_id", FieldKind::String),
    Field::optional("monitor_groups", FieldKind::StringList),
    Field::optional("user_group_ids", FieldKind::StringList),
    Field::optional("actions", FieldKind::StringMap),
    Field::defaulted("use_name_server", FieldKind::Bool, FieldDefault::Bool(true)),
];

static SCHEMA: Schema = Schema {
    type_name: TYPE_NAME,
    fields: FIELDS,
};

/// Maps `site24x7_website_monitor` onto `/monitors` entities of type `URL`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebsiteMonitorResource;

impl WebsiteMonitorResource {
    /// Build the outbound entity. Fails before any remote call when the
    /// `actions` map or a match severity is malformed.
    pub fn build(data: &ResourceData) -> Result<Monitor> {
        let mut m = monitor::common_entity(data, MONITOR_TYPE_URL)?;

        m.website = Some(data.get_str("website").to_string());
        m.http_method = Some(data.get_str("http_method").to_string());
        m.auth_user = monitor::optional_str(data, "auth_user");
        m.auth_pass = monitor::optional_str(data, "auth_pass");
        m.matching_keyword = monitor::match_rule(
            data,
            "matching_keyword_value",
            "matching_keyword_severity",
        )?;
        m.unmatching_keyword = monitor::match_rule(
            data,
            "unmatching_keyword_value",
            "unmatching_keyword_severity",
        )?;
        m.match_regex = monitor::match_rule(data, "match_regex_value", "match_regex_severity")?;
        m.match_case = Some(data.get_bool("match_case"));
        m.user_agent = monitor::optional_str(data, "user_agent");
        m.custom_headers = Some(monitor::custom_headers(data));
        m.use_name_server = Some(data.get_bool("use_name_server"));

        Ok(m)
    }

    /// Overwrite `data` with a fetched monitor
    pub fn apply(data: &mut ResourceData, m: &Monitor) -> Result<()> {
        monitor::read_common(data, m)?;

        data.set("website", m.website.clone().unwrap_or_default());
        data.set("http_method", m.http_method.clone().unwrap_or_default());
        data.set("auth_user", m.auth_user.clone().unwrap_or_default());
        // write-only unless the API echoes it
        if let Some(ref pass) = m.auth_pass {
            data.set("auth_pass", pass.clone());
        }
        read_rule(
            data,
            m.matching_keyword.as_ref(),
            "matching_keyword_value",
            "matching_keyword_severity",
        );
        read_rule(
            data,
            m.unmatching_keyword.as_ref(),
            "unmatching_keyword_value",
            "unmatching_keyword_severity",
        );
        read_rule(
            data,
            m.match_regex.as_ref(),
            "match_regex_value",
            "match_regex_severity",
        );
        data.set("match_case", m.match_case.unwrap_or_default());
        data.set("user_agent", m.user_agent.clone().unwrap_or_default());
        data.set_str_map(
            "custom_headers",
            monitor::headers_map(m.custom_headers.as_deref().unwrap_or_default()),
        );
        data.set("use_name_server", m.use_name_server.unwrap_or_default());

        Ok(())
    }
}

/// A missing rule clears its value; the stored severity stays
fn read_rule(
    data: &mut ResourceData,
    rule: Option<&ValueAndSeverity>,
    value_key: &str,
    severity_key: &str,
) {
    match rule {
        Some(rule) => {
            data.set(value_key, rule.value.clone());
            data.set(severity_key, rule.severity.code());
        }
        None => data.set(value_key, ""),
    }
}

#[async_trait]
impl Resource for WebsiteMonitorResource {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ActionRef, Header, Status};
    use serde_json::json;

    fn data(attrs: serde_json::Value) -> ResourceData {
        ResourceData::new(&SCHEMA, attrs.as_object().cloned().unwrap()).unwrap()
    }

    #[test]
    fn test_build_applies_schema_defaults() {
        let d = data(json!({
            "display_name": "foo",
            "website": "www.test.tld",
            "location_profile_id": "456",
            "notification_profile_id": "789",
            "threshold_profile_id": "012",
            "user_group_ids": ["123"],
        }));

        let m = WebsiteMonitorResource::build(&d).unwrap();

        assert_eq!(m.monitor_type, "URL");
        assert_eq!(m.check_frequency, "1");
        assert_eq!(m.http_method.as_deref(), Some("G"));
        assert_eq!(m.timeout, 10);
        assert_eq!(m.use_name_server, Some(true));
        assert_eq!(m.custom_headers, Some(vec![]));
        assert!(m.action_ids.is_empty());
        assert!(m.matching_keyword.is_none());
        assert!(m.unmatching_keyword.is_none());
        assert!(m.match_regex.is_none());
        assert!(m.auth_user.is_none());
        assert!(m.dns_host.is_none());
    }

    #[test]
    fn test_build_full_monitor() {
        let d = data(json!({
            "display_name": "foo",
            "website": "www.test.tld",
            "custom_headers": {"Cache-Control": "nocache", "Accept": "application/json"},
            "actions": {"5": "234action", "1": "123action"},
            "unmatching_keyword_value": "foo",
            "matching_keyword_value": "bar",
            "match_regex_value": ".*",
            "match_regex_severity": 0,
        }));

        let m = WebsiteMonitorResource::build(&d).unwrap();

        assert_eq!(
            m.custom_headers.unwrap(),
            vec![
                Header {
                    name: "Accept".to_string(),
                    value: "application/json".to_string()
                },
                Header {
                    name: "Cache-Control".to_string(),
                    value: "nocache".to_string()
                },
            ]
        );
        assert_eq!(
            m.action_ids,
            vec![
                ActionRef {
                    action_id: "123action".to_string(),
                    alert_type: Status::Up
                },
                ActionRef {
                    action_id: "234action".to_string(),
                    alert_type: Status::Suspended
                },
            ]
        );
        assert_eq!(
            m.match_regex,
            Some(ValueAndSeverity {
                value: ".*".to_string(),
                severity: Status::Down
            })
        );
        assert_eq!(m.matching_keyword.unwrap().severity, Status::Trouble);
    }

    #[test]
    fn test_apply_keeps_unechoed_password() {
        let mut d = data(json!({
            "display_name": "foo",
            "website": "www.test.tld",
            "auth_user": "admin",
            "auth_pass": "hunter2",
        }));

        let remote = Monitor {
            display_name: "foo".to_string(),
            monitor_type: "URL".to_string(),
            check_frequency: "5".to_string(),
            timeout: 10,
            website: Some("www.test.tld".to_string()),
            auth_user: Some("admin".to_string()),
            custom_headers: Some(vec![Header {
                name: String::new(),
                value: "dropped".to_string(),
            }]),
            ..Default::default()
        };

        WebsiteMonitorResource::apply(&mut d, &remote).unwrap();

        assert_eq!(d.get_str("auth_pass"), "hunter2");
        assert_eq!(d.get_int("check_frequency"), 5);
        assert!(d.get_str_map("custom_headers").is_empty());
    }
}
