//! Generic REST collection
//!
//! Every entity lives under `<base_url>/<PATH>`:
//!
//! ```http
//! POST   /<PATH>        201  create
//! GET    /<PATH>        200  list
//! GET    /<PATH>/<id>   200  get
//! PUT    /<PATH>/<id>   200  update
//! DELETE /<PATH>/<id>   200  delete
//! ```

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use site24x7_core::traits::{Collection, Listing};
use site24x7_core::{Entity, Result};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use crate::http::{decode_data, decode_list, Transport};

/// [`Collection`] and [`Listing`] over one REST path
pub struct HttpCollection<T: Entity> {
    transport: Arc<Transport>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> HttpCollection<T> {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self {
            transport,
            _entity: PhantomData,
        }
    }

    fn member(id: &str) -> String {
        format!("{}/{}", T::PATH, id)
    }
}

impl<T: Entity> std::fmt::Debug for HttpCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCollection")
            .field("path", &T::PATH)
            .finish()
    }
}

#[async_trait]
impl<T: Entity> Collection<T> for HttpCollection<T> {
    async fn create(&self, entity: &T) -> Result<T> {
        let body = serde_json::to_value(entity)?;
        let text = self
            .transport
            .send(Method::POST, T::PATH, Some(&body), StatusCode::CREATED)
            .await?;

        let created: T = decode_data(&text, T::KIND)?;
        debug!("Created {} {}", T::KIND, created.id());
        Ok(created)
    }

    async fn get(&self, id: &str) -> Result<T> {
        let text = self
            .transport
            .send(Method::GET, &Self::member(id), None, StatusCode::OK)
            .await?;

        decode_data(&text, T::KIND)
    }

    async fn update(&self, entity: &T) -> Result<T> {
        let body = serde_json::to_value(entity)?;
        let text = self
            .transport
            .send(
                Method::PUT,
                &Self::member(entity.id()),
                Some(&body),
                StatusCode::OK,
            )
            .await?;

        decode_data(&text, T::KIND)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .send(Method::DELETE, &Self::member(id), None, StatusCode::OK)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<T: Entity> Listing<T> for HttpCollection<T> {
    async fn list(&self) -> Result<Vec<T>> {
        let text = self
            .transport
            .send(Method::GET, T::PATH, None, StatusCode::OK)
            .await?;

        let items: Vec<T> = decode_list(&text, T::KIND)?;
        debug!("Listed {} {} entries", items.len(), T::KIND);
        Ok(items)
    }
}
