//! Read-only profile references
//!
//! Owned by the remote service. The provider only ever lists them to pick
//! a default ID; they are never created or modified from here.

use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationProfile {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub profile_name: String,
}

impl Entity for LocationProfile {
    const PATH: &'static str = "location_profiles";
    const KIND: &'static str = "location profile";

    fn id(&self) -> &str {
        &self.profile_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationProfile {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub profile_name: String,
}

impl Entity for NotificationProfile {
    const PATH: &'static str = "notification_profiles";
    const KIND: &'static str = "notification profile";

    fn id(&self) -> &str {
        &self.profile_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    #[serde(default)]
    pub profile_id: String,
    #[serde(default)]
    pub profile_name: String,
    #[serde(rename = "type", default)]
    pub profile_type: String,
}

impl Entity for ThresholdProfile {
    const PATH: &'static str = "threshold_profiles";
    const KIND: &'static str = "threshold profile";

    fn id(&self) -> &str {
        &self.profile_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    #[serde(default)]
    pub user_group_id: String,
    #[serde(default)]
    pub display_name: String,
}

impl Entity for UserGroup {
    const PATH: &'static str = "user_groups";
    const KIND: &'static str = "user group";

    fn id(&self) -> &str {
        &self.user_group_id
    }
}
