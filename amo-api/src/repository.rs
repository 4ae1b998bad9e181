//! Generic per-entity repository.
//!
//! A repository binds a resource path and an entity type tag to the typed
//! codecs of one entity, and translates each operation into exactly one
//! HTTP call. Repositories hold no state beyond the binding; every call is
//! an independent request/response cycle.

use std::borrow::Cow;
use std::marker::PhantomData;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use amo_core::constants;
use amo_core::error::{AmoError, AmoResult};
use amo_core::validate;
use amo_models::{CreatedEntity, EntityLink, EntityLinks};

use crate::client::AmoClient;
use crate::filter::{FilterBuilder, FilterOperator, QueryParams};
use crate::response::{CreatedRecord, ListEnvelope};

/// Binding between an entity model and its REST resource.
///
/// Implemented per concrete entity type; the repository itself is generic
/// over this trait (composition over a bound path and a pair of codecs).
pub trait Entity: DeserializeOwned + Serialize + Send + Sync {
    /// Resource path under the API root, e.g. `/leads`.
    const PATH: &'static str;

    /// The tag the provider uses as the embedded-array key.
    const ENTITY_TYPE: &'static str;

    /// Payload type accepted by create calls.
    type Input: Serialize + Send + Sync;

    /// The record's numeric id, when it has one.
    fn entity_id(&self) -> Option<i64>;
}

/// The per-entity CRUD facade over the remote API.
pub struct Repository<'a, E: Entity> {
    client: &'a AmoClient,
    path: Cow<'static, str>,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> Repository<'a, E> {
    pub(crate) fn new(client: &'a AmoClient) -> Self {
        Self {
            client,
            path: Cow::Borrowed(E::PATH),
            _entity: PhantomData,
        }
    }

    /// Bind a runtime path instead of `E::PATH` (nested resources such as
    /// pipeline statuses and notes).
    pub(crate) fn with_path(client: &'a AmoClient, path: String) -> Self {
        Self {
            client,
            path: Cow::Owned(path),
            _entity: PhantomData,
        }
    }

    /// The bound resource path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fetch all entities matching the query parameters.
    ///
    /// Returns an empty list when nothing matches (the server answers 204
    /// or omits the embedded key), never an error.
    pub async fn get_all(&self, params: Option<&QueryParams>) -> AmoResult<Vec<E>> {
        let response = self.client.get(&self.path, params).await?;
        let response = AmoClient::ensure_success(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let mut envelope: ListEnvelope = decode_json(response).await?;
        envelope.take_embedded(E::ENTITY_TYPE)
    }

    /// Fetch a single entity by id. `Ok(None)` when the server answers
    /// 404 or 204; a typed error for any other error status.
    pub async fn get_by_id(&self, entity_id: i64, params: Option<&QueryParams>) -> AmoResult<Option<E>> {
        validate::validate_entity_id(entity_id)?;
        let path = format!("{}/{}", self.path, entity_id);
        let response = self.client.get(&path, params).await?;

        match response.status().as_u16() {
            404 | 204 => Ok(None),
            status if status >= 400 => Err(AmoClient::error_from_response(response).await),
            _ => Ok(Some(decode_json(response).await?)),
        }
    }

    /// Fetch a set of entities by id in one call.
    ///
    /// An empty input returns an empty list without touching the network.
    pub async fn get_by_ids(&self, entity_ids: &[i64]) -> AmoResult<Vec<E>> {
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }
        validate::validate_entity_ids(entity_ids)?;

        let params = FilterBuilder::new()
            .add_filter("id", entity_ids, FilterOperator::Equals)
            .build();
        self.get_all(Some(&params)).await
    }

    /// Count entities matching the query parameters without fetching
    /// their bodies: one minimal page, read `_page.total`.
    pub async fn count(&self, params: Option<&QueryParams>) -> AmoResult<i64> {
        let mut params = params.cloned().unwrap_or_default();
        params.insert("limit".into(), "1".into());

        let response = self.client.get(&self.path, Some(&params)).await?;
        let response = AmoClient::ensure_success(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(0);
        }

        let envelope: ListEnvelope = decode_json(response).await?;
        Ok(envelope.total().unwrap_or(0))
    }

    /// Probe for existence with a HEAD request: true iff the server
    /// answers 200.
    pub async fn exists(&self, entity_id: i64) -> AmoResult<bool> {
        validate::validate_entity_id(entity_id)?;
        let path = format!("{}/{}", self.path, entity_id);
        let response = self.client.head(&path).await?;

        match response.status().as_u16() {
            200 => Ok(true),
            204 | 404 => Ok(false),
            status if status >= 400 => Err(AmoClient::error_from_response(response).await),
            _ => Ok(false),
        }
    }

    /// Create entities in one bulk call.
    ///
    /// The provider's bulk endpoint is all-or-nothing: one rejected item
    /// fails the whole request. The response carries one id + self link
    /// per item in request order, never the full entity bodies, so the
    /// result is a list of [`CreatedEntity`], not `E`.
    pub async fn create(&self, inputs: &[E::Input]) -> AmoResult<Vec<CreatedEntity>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::to_value(inputs)?;
        let response = self.client.post(&self.path, &body).await?;
        let response = AmoClient::ensure_success(response).await?;

        let mut envelope: ListEnvelope = decode_json(response).await?;
        let records: Vec<CreatedRecord> = envelope.take_embedded(E::ENTITY_TYPE)?;
        debug!("created {} {}", records.len(), E::ENTITY_TYPE);
        Ok(records
            .into_iter()
            .map(|r| r.into_created(E::ENTITY_TYPE))
            .collect())
    }

    /// Update one entity. The input must carry its id; the id travels in
    /// the URL and the remaining set fields form the PATCH body. Returns
    /// the updated entity as the server decoded it.
    pub async fn update(&self, entity: &E) -> AmoResult<E> {
        let entity_id = entity
            .entity_id()
            .ok_or_else(|| AmoError::validation("entity id is required for update"))?;
        validate::validate_entity_id(entity_id)?;

        let mut body = serde_json::to_value(entity)?;
        if let Some(map) = body.as_object_mut() {
            map.remove("id");
        }

        let path = format!("{}/{}", self.path, entity_id);
        let response = self.client.patch(&path, &body).await?;
        let response = AmoClient::ensure_success(response).await?;
        decode_json(response).await
    }

    /// Delete one entity. The provider answers 204 on success; anything
    /// else is a failure.
    pub async fn delete(&self, entity_id: i64) -> AmoResult<()> {
        validate::validate_entity_id(entity_id)?;
        let path = format!("{}/{}", self.path, entity_id);
        let response = self.client.delete(&path).await?;

        match response.status().as_u16() {
            204 => Ok(()),
            status if status >= 400 => Err(AmoClient::error_from_response(response).await),
            status => Err(AmoError::Api {
                status,
                message: "unexpected response to delete".into(),
                body: None,
            }),
        }
    }

    /// Fetch the entity's cross-entity relationship links.
    ///
    /// Provider contract: only leads, contacts, companies, and customers
    /// carry links; any other entity type fails here before a request is
    /// built.
    pub async fn links(&self, entity_id: i64) -> AmoResult<EntityLinks> {
        if !constants::is_linkable(E::ENTITY_TYPE) {
            return Err(AmoError::UnsupportedOperation {
                operation: "links".into(),
                entity_type: E::ENTITY_TYPE.into(),
            });
        }
        validate::validate_entity_id(entity_id)?;

        let path = format!("{}/{}/links", self.path, entity_id);
        let response = self.client.get(&path, None).await?;
        let response = AmoClient::ensure_success(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(EntityLinks::default());
        }

        let mut envelope: ListEnvelope = decode_json(response).await?;
        let links: Vec<EntityLink> = envelope.take_embedded("links")?;
        Ok(EntityLinks { links })
    }
}

/// Decode a response body, mapping decode failures to serialization
/// errors rather than transport errors.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> AmoResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| AmoError::Serialization(format!("failed to decode response: {e}")))
}
