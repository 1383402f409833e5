//! Default profile and user-group resolution
//!
//! When a monitor leaves a profile reference empty, the first entry the API
//! lists for that category is used. The list is taken in the order the API
//! returns it and is never sorted.

use tracing::debug;

use crate::api::{Entity, LocationProfile, NotificationProfile, ThresholdProfile, UserGroup};
use crate::error::{Error, Result};
use crate::traits::{Listing, Site24x7Client};

async fn first_of<T: Entity>(lister: &dyn Listing<T>, category: &'static str) -> Result<T> {
    let items = lister.list().await?;
    let first = items.into_iter().next().ok_or(Error::NoDefault(category))?;

    debug!("Using default {} {}", T::KIND, first.id());
    Ok(first)
}

/// Fetch the first location profile returned by the client.
///
/// Fails with "no location profiles configured" if the list is empty.
pub async fn default_location_profile(client: &dyn Site24x7Client) -> Result<LocationProfile> {
    first_of(client.location_profiles(), "location profiles").await
}

/// Fetch the first notification profile returned by the client.
pub async fn default_notification_profile(
    client: &dyn Site24x7Client,
) -> Result<NotificationProfile> {
    first_of(client.notification_profiles(), "notification profiles").await
}

/// Fetch the first threshold profile returned by the client.
pub async fn default_threshold_profile(client: &dyn Site24x7Client) -> Result<ThresholdProfile> {
    first_of(client.threshold_profiles(), "threshold profiles").await
}

/// Fetch the first user group returned by the client.
pub async fn default_user_group(client: &dyn Site24x7Client) -> Result<UserGroup> {
    first_of(client.user_groups(), "user groups").await
}
