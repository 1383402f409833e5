// # Site24x7 API Entities
//
// JSON representations of the remote resources, as sent to and received
// from the REST API. Every collection entity implements [`Entity`] so one
// generic HTTP collection can serve all of them.
//
// ## Optional fields
//
// Fields the caller may leave unset are `Option`s that are skipped on
// serialization. `None` means "not supplied" and is never sent as an empty
// value; an empty match string and "no matching rule" stay distinguishable.

pub mod it_automation;
pub mod monitor;
pub mod monitor_group;
pub mod profiles;

pub use it_automation::ItAutomation;
pub use monitor::{ActionRef, Header, Monitor, ValueAndSeverity};
pub use monitor_group::MonitorGroup;
pub use profiles::{LocationProfile, NotificationProfile, ThresholdProfile, UserGroup};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;

/// A remote resource living in a REST collection
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the API base URL (e.g. `monitors`)
    const PATH: &'static str;

    /// Human readable kind, used in log lines and error context
    const KIND: &'static str;

    /// The remote-assigned ID; empty before creation
    fn id(&self) -> &str;
}

/// Monitor status, used as the alert severity key when mapping to actions
///
/// Responses may carry codes this crate does not know; they decode to
/// [`Status::Unknown`] so the rest of the entity stays readable. Local
/// input only accepts the known codes (see [`Status::known`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, serde::Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Status {
    Down,
    Up,
    Trouble,
    Suspended,
    Maintenance,
    Discovery,
    DiscoveryError,
    Unknown(i64),
}

impl Status {
    /// Numeric wire value
    pub fn code(self) -> i64 {
        match self {
            Status::Down => 0,
            Status::Up => 1,
            Status::Trouble => 2,
            Status::Suspended => 5,
            Status::Maintenance => 7,
            Status::Discovery => 9,
            Status::DiscoveryError => 10,
            Status::Unknown(code) => code,
        }
    }

    /// Strict lookup for caller-supplied codes
    pub fn known(code: i64) -> crate::Result<Self> {
        match Status::from(code) {
            Status::Unknown(other) => Err(crate::Error::invalid_input(format!(
                "unknown monitor status: {}",
                other
            ))),
            status => Ok(status),
        }
    }
}

impl From<i64> for Status {
    fn from(code: i64) -> Self {
        match code {
            0 => Status::Down,
            1 => Status::Up,
            2 => Status::Trouble,
            5 => Status::Suspended,
            7 => Status::Maintenance,
            9 => Status::Discovery,
            10 => Status::DiscoveryError,
            other => Status::Unknown(other),
        }
    }
}

impl From<Status> for i64 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl FromStr for Status {
    type Err = crate::Error;

    /// Parse a severity key such as `"1"` taken from an `actions` map
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let code: i64 = key.trim().parse().map_err(|e| {
            crate::Error::invalid_input(format!("parsing severity key {:?}: {}", key, e))
        })?;
        Status::known(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
