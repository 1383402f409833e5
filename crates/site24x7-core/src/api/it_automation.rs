//! IT automation entity (`/it_automation`)
//!
//! The host calls these "actions": webhook-style callbacks a monitor
//! invokes when it reaches a given status.

use serde::{Deserialize, Serialize};

use super::Entity;

/// URL action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItAutomation {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action_id: String,
    #[serde(default)]
    pub action_name: String,
    #[serde(default)]
    pub action_type: i64,
    #[serde(default)]
    pub action_method: String,
    #[serde(default)]
    pub action_url: String,
    #[serde(default)]
    pub action_timeout: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_parameters: Option<String>,
    #[serde(default)]
    pub requires_authentication: bool,
    #[serde(default)]
    pub send_custom_parameters: bool,
    #[serde(default)]
    pub send_in_json_format: bool,
    #[serde(default)]
    pub send_incident_parameters: bool,
}

impl Entity for ItAutomation {
    const PATH: &'static str = "it_automation";
    const KIND: &'static str = "action";

    fn id(&self) -> &str {
        &self.action_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_parameters_omitted_when_unset() {
        let action = ItAutomation {
            action_name: "hook".to_string(),
            action_type: 1,
            action_method: "P".to_string(),
            action_url: "https://example.com".to_string(),
            action_timeout: 30,
            ..Default::default()
        };

        let json = serde_json::to_value(&action).unwrap();
        assert!(json.get("custom_parameters").is_none());
        assert!(json.get("action_id").is_none());
        assert_eq!(json["action_method"], "P");
    }
}
