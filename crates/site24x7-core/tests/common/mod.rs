//! Test doubles and common utilities for resource contract tests
//!
//! [`FakeClient`] stands in for the HTTP client. Every collection keeps an
//! in-memory store, can be scripted to reply or fail on its next call, and
//! records each call in a log shared across the whole client so tests can
//! assert how many remote calls an operation made.

#![allow(dead_code)]

use serde_json::{Map, Value};
use site24x7_core::api::{
    ItAutomation, LocationProfile, Monitor, MonitorGroup, NotificationProfile, ThresholdProfile,
    UserGroup,
};
use site24x7_core::error::{Error, Result};
use site24x7_core::traits::{Collection, Listing, Site24x7Client};
use site24x7_core::{Entity, ResourceData, ResourceKind};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Call log shared by every collection of one client
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Next reply of a scripted collection
pub enum Scripted<T> {
    Reply(T),
    Fail(Error),
}

/// In-memory collection with scripted replies
pub struct FakeCollection<T: Entity> {
    calls: CallLog,
    set_id: fn(&mut T, String),
    next_id: AtomicUsize,
    store: Mutex<BTreeMap<String, T>>,
    script: Mutex<VecDeque<Scripted<T>>>,
    sent: Mutex<Vec<T>>,
}

impl<T: Entity> FakeCollection<T> {
    pub fn new(calls: CallLog, set_id: fn(&mut T, String)) -> Self {
        Self {
            calls,
            set_id,
            next_id: AtomicUsize::new(100),
            store: Mutex::new(BTreeMap::new()),
            script: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Make the next call return `entity` instead of touching the store
    pub fn reply_with(&self, entity: T) {
        self.script.lock().unwrap().push_back(Scripted::Reply(entity));
    }

    /// Make the next call fail with `err`
    pub fn fail_with(&self, err: Error) {
        self.script.lock().unwrap().push_back(Scripted::Fail(err));
    }

    /// Seed the store under the entity's own ID
    pub fn insert(&self, entity: T) {
        let id = entity.id().to_string();
        self.store.lock().unwrap().insert(id, entity);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.lock().unwrap().contains_key(id)
    }

    /// Entities passed to `create` and `update`, in call order
    pub fn sent(&self) -> Vec<T> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_sent(&self) -> T {
        self.sent().pop().expect("nothing was sent")
    }

    fn record(&self, call: String) -> Option<Scripted<T>> {
        self.calls.lock().unwrap().push(call);
        self.script.lock().unwrap().pop_front()
    }

    fn missing(id: &str) -> Error {
        Error::not_found(format!("{} {} not found", T::KIND, id))
    }
}

#[async_trait::async_trait]
impl<T: Entity> Collection<T> for FakeCollection<T> {
    async fn create(&self, entity: &T) -> Result<T> {
        self.sent.lock().unwrap().push(entity.clone());

        match self.record(format!("create {}", T::PATH)) {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Fail(err)) => Err(err),
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
                let mut stored = entity.clone();
                (self.set_id)(&mut stored, id.clone());
                self.store.lock().unwrap().insert(id, stored.clone());
                Ok(stored)
            }
        }
    }

    async fn get(&self, id: &str) -> Result<T> {
        match self.record(format!("get {}/{}", T::PATH, id)) {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Fail(err)) => Err(err),
            None => self
                .store
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| Self::missing(id)),
        }
    }

    async fn update(&self, entity: &T) -> Result<T> {
        self.sent.lock().unwrap().push(entity.clone());

        match self.record(format!("update {}/{}", T::PATH, entity.id())) {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Fail(err)) => Err(err),
            None => {
                let mut store = self.store.lock().unwrap();
                match store.get_mut(entity.id()) {
                    Some(stored) => {
                        *stored = entity.clone();
                        Ok(entity.clone())
                    }
                    None => Err(Self::missing(entity.id())),
                }
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.record(format!("delete {}/{}", T::PATH, id)) {
            Some(Scripted::Reply(_)) => Ok(()),
            Some(Scripted::Fail(err)) => Err(err),
            None => self
                .store
                .lock()
                .unwrap()
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| Self::missing(id)),
        }
    }
}

/// Listing returning a fixed list, or a scripted failure
pub struct FakeListing<T: Entity> {
    calls: CallLog,
    items: Mutex<Vec<T>>,
    failure: Mutex<Option<Error>>,
}

impl<T: Entity> FakeListing<T> {
    pub fn new(calls: CallLog) -> Self {
        Self {
            calls,
            items: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn set_items(&self, items: Vec<T>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn fail_with(&self, err: Error) {
        *self.failure.lock().unwrap() = Some(err);
    }
}

#[async_trait::async_trait]
impl<T: Entity> Listing<T> for FakeListing<T> {
    async fn list(&self) -> Result<Vec<T>> {
        self.calls.lock().unwrap().push(format!("list {}", T::PATH));

        match self.failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(self.items.lock().unwrap().clone()),
        }
    }
}

/// Scripted stand-in for the HTTP client
pub struct FakeClient {
    calls: CallLog,
    pub monitors: FakeCollection<Monitor>,
    pub monitor_groups: FakeCollection<MonitorGroup>,
    pub it_automations: FakeCollection<ItAutomation>,
    pub location_profiles: FakeListing<LocationProfile>,
    pub notification_profiles: FakeListing<NotificationProfile>,
    pub threshold_profiles: FakeListing<ThresholdProfile>,
    pub user_groups: FakeListing<UserGroup>,
}

impl FakeClient {
    /// Client with empty collections and no profiles
    pub fn new() -> Self {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));

        Self {
            monitors: FakeCollection::new(calls.clone(), |m: &mut Monitor, id| {
                m.monitor_id = id
            }),
            monitor_groups: FakeCollection::new(calls.clone(), |g: &mut MonitorGroup, id| {
                g.group_id = id
            }),
            it_automations: FakeCollection::new(calls.clone(), |a: &mut ItAutomation, id| {
                a.action_id = id
            }),
            location_profiles: FakeListing::new(calls.clone()),
            notification_profiles: FakeListing::new(calls.clone()),
            threshold_profiles: FakeListing::new(calls.clone()),
            user_groups: FakeListing::new(calls.clone()),
            calls,
        }
    }

    /// Client whose account lists one profile of each kind and one user group
    pub fn with_profiles() -> Self {
        let client = Self::new();

        client.location_profiles.set_items(vec![LocationProfile {
            profile_id: "456".to_string(),
            profile_name: "Default Location".to_string(),
        }]);
        client
            .notification_profiles
            .set_items(vec![NotificationProfile {
                profile_id: "789".to_string(),
                profile_name: "Default Notification".to_string(),
            }]);
        client.threshold_profiles.set_items(vec![ThresholdProfile {
            profile_id: "012".to_string(),
            profile_name: "Default Threshold".to_string(),
            profile_type: "URL".to_string(),
        }]);
        client.user_groups.set_items(vec![UserGroup {
            user_group_id: "123".to_string(),
            display_name: "Admin Group".to_string(),
        }]);

        client
    }

    /// Every remote call made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Site24x7Client for FakeClient {
    fn monitors(&self) -> &dyn Collection<Monitor> {
        &self.monitors
    }

    fn monitor_groups(&self) -> &dyn Collection<MonitorGroup> {
        &self.monitor_groups
    }

    fn it_automations(&self) -> &dyn Collection<ItAutomation> {
        &self.it_automations
    }

    fn location_profiles(&self) -> &dyn Listing<LocationProfile> {
        &self.location_profiles
    }

    fn notification_profiles(&self) -> &dyn Listing<NotificationProfile> {
        &self.notification_profiles
    }

    fn threshold_profiles(&self) -> &dyn Listing<ThresholdProfile> {
        &self.threshold_profiles
    }

    fn user_groups(&self) -> &dyn Listing<UserGroup> {
        &self.user_groups
    }
}

/// Build validated resource data for `kind` from a JSON object
pub fn resource_data(kind: ResourceKind, attributes: Value) -> ResourceData {
    let attributes: Map<String, Value> = attributes
        .as_object()
        .cloned()
        .expect("attributes must be a JSON object");

    ResourceData::new(kind.resource().schema(), attributes).expect("valid resource data")
}

/// A 500 the way the API reports it
pub fn server_error() -> Error {
    Error::Status {
        status: 500,
        code: Some(1000),
        message: "Internal Server Error".to_string(),
    }
}
