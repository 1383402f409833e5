//! Monitor group entity (`/monitor_groups`)

use serde::{Deserialize, Serialize};

use super::Entity;

/// A flat container for monitors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorGroup {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

impl Entity for MonitorGroup {
    const PATH: &'static str = "monitor_groups";
    const KIND: &'static str = "monitor group";

    fn id(&self) -> &str {
        &self.group_id
    }
}
