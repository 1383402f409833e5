//! Monitor entity (`/monitors`)
//!
//! Website (`type = "URL"`) and DNS (`type = "DNS"`) monitors share one
//! remote collection and one entity shape; the variant-specific fields are
//! optional and left out of the body for the other variant.

use serde::{Deserialize, Serialize};

use super::{Entity, Status};

/// Monitor type tag for website monitors
pub const MONITOR_TYPE_URL: &str = "URL";

/// Monitor type tag for DNS monitors
pub const MONITOR_TYPE_DNS: &str = "DNS";

/// A keyword or regex match rule with the severity raised when it fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueAndSeverity {
    pub value: String,
    pub severity: Status,
}

/// Custom HTTP header sent by a website monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// "When this severity occurs, invoke this action"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRef {
    pub action_id: String,
    pub alert_type: Status,
}

/// Site24x7 monitor
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub monitor_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub monitor_type: String,
    #[serde(default)]
    pub check_frequency: String,
    #[serde(default)]
    pub timeout: i64,

    // website monitors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_keyword: Option<ValueAndSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmatching_keyword: Option<ValueAndSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_regex: Option<ValueAndSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_case: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<Vec<Header>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_name_server: Option<bool>,

    // DNS monitors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,

    #[serde(default)]
    pub location_profile_id: String,
    #[serde(default)]
    pub notification_profile_id: String,
    #[serde(default)]
    pub threshold_profile_id: String,
    #[serde(default)]
    pub monitor_groups: Vec<String>,
    #[serde(default)]
    pub user_group_ids: Vec<String>,
    #[serde(default)]
    pub action_ids: Vec<ActionRef>,
}

impl Entity for Monitor {
    const PATH: &'static str = "monitors";
    const KIND: &'static str = "monitor";

    fn id(&self) -> &str {
        &self.monitor_id
    }
}

// Custom Debug implementation that hides the basic-auth password
impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("monitor_id", &self.monitor_id)
            .field("display_name", &self.display_name)
            .field("type", &self.monitor_type)
            .field("check_frequency", &self.check_frequency)
            .field("timeout", &self.timeout)
            .field("website", &self.website)
            .field("http_method", &self.http_method)
            .field("auth_user", &self.auth_user)
            .field("auth_pass", &self.auth_pass.as_ref().map(|_| "<REDACTED>"))
            .field("matching_keyword", &self.matching_keyword)
            .field("unmatching_keyword", &self.unmatching_keyword)
            .field("match_regex", &self.match_regex)
            .field("match_case", &self.match_case)
            .field("user_agent", &self.user_agent)
            .field("custom_headers", &self.custom_headers)
            .field("use_name_server", &self.use_name_server)
            .field("dns_host", &self.dns_host)
            .field("dns_port", &self.dns_port)
            .field("domain_name", &self.domain_name)
            .field("location_profile_id", &self.location_profile_id)
            .field("notification_profile_id", &self.notification_profile_id)
            .field("threshold_profile_id", &self.threshold_profile_id)
            .field("monitor_groups", &self.monitor_groups)
            .field("user_group_ids", &self.user_group_ids)
            .field("action_ids", &self.action_ids)
            .finish()
    }
}
