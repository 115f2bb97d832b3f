//! Entity client: search fan-out, single lookup and writes against OpenGIN.
//!
//! Reads go to the read API's search endpoint, writes to the ingestion API.
//! Every search response passes through [`parse_search_body`], so the
//! envelope differences between backend builds never leak past this module.
//!
//! Error policy on the bulk listing is coarse: if any major kind fails with a
//! transport error or a non-OK, non-404 status, the whole listing is replaced
//! by the static sample set. A 404 or a malformed body only empties that kind.

use crate::error::{endpoint, ClientError};
use crate::transport::{ApiRequest, HyperTransport, Transport};
use futures::future::join_all;
use gin_core::config::{BackendConfig, Config};
use gin_core::name::normalize_record_name;
use gin_core::response::{parse_search_body, Unwrapped};
use gin_core::sample::sample_entity_records;
use gin_core::{Entity, EntityListing, Record};
use hyper::Method;
use serde_json::{json, Value};

pub struct EntityClient<T> {
    transport: T,
    read_url: String,
    ingestion_url: String,
    major_kinds: Vec<String>,
    fallback: Vec<Record>,
}

impl EntityClient<HyperTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            HyperTransport::new(),
            &config.backend,
            config.search.major_kinds.clone(),
        )
    }
}

impl<T: Transport> EntityClient<T> {
    /// A client whose degraded listing is the built-in sample set.
    pub fn new(transport: T, backend: &BackendConfig, major_kinds: Vec<String>) -> Self {
        Self {
            transport,
            read_url: backend.read_url.clone(),
            ingestion_url: backend.ingestion_url.clone(),
            major_kinds,
            fallback: sample_entity_records(),
        }
    }

    /// Replace the records served when the listing degrades.
    pub fn with_fallback(mut self, fallback: Vec<Record>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn major_kinds(&self) -> &[String] {
        &self.major_kinds
    }

    /// Every entity across all configured major kinds.
    ///
    /// One search per kind, all in flight at once. The merge waits for every
    /// search to settle, then concatenates in kind order. Records are not
    /// de-duplicated across kinds.
    pub async fn list_entities(&self) -> EntityListing {
        let outcomes = join_all(self.major_kinds.iter().map(|major| self.search_kind(major))).await;

        let mut entities = Vec::new();
        let mut failed = false;
        for (major, outcome) in self.major_kinds.iter().zip(outcomes) {
            match outcome {
                Ok(records) => entities.extend(records),
                Err(err) => {
                    tracing::error!(major = %major, %err, "entity search failed");
                    failed = true;
                }
            }
        }

        if failed {
            tracing::warn!(
                records = self.fallback.len(),
                "serving sample entities in place of live results"
            );
            return EntityListing::fallback(self.fallback.clone());
        }
        EntityListing::live(entities)
    }

    /// Look up one entity by id. A 404 or an empty result is `None`.
    pub async fn get_entity(&self, id: &str) -> Result<Option<Record>, ClientError> {
        let response = self.search(json!({ "id": id })).await?;
        if response.is_not_found() {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(ClientError::from_response(&response, "error"));
        }

        let first = match parse_search_body(&response.body) {
            Ok(Unwrapped::Records(records)) => records.into_iter().next(),
            Ok(Unwrapped::Absent) => None,
            // Older builds answer an id lookup with the bare record.
            Ok(Unwrapped::Unrecognized(payload)) if payload.get("id").is_some() => Some(payload),
            Ok(Unwrapped::Unrecognized(payload)) => {
                tracing::warn!(id, %payload, "unrecognized entity lookup payload");
                None
            }
            Err(err) => {
                tracing::warn!(id, %err, "malformed entity lookup body");
                None
            }
        };

        Ok(first.and_then(into_record))
    }

    /// `POST /entities` on the ingestion API.
    pub async fn create_entity(&self, entity: &Entity) -> Result<Record, ClientError> {
        let url = endpoint(&self.ingestion_url, &["entities"])?;
        let body = Value::Object(entity.to_record());
        self.write(ApiRequest::json(Method::POST, url, &body)).await
    }

    /// `PUT /entities/{id}` on the ingestion API. `kind` is never sent.
    pub async fn update_entity(&self, entity: &Entity) -> Result<Record, ClientError> {
        let url = endpoint(&self.ingestion_url, &["entities", entity.id.as_str()])?;
        let body = Value::Object(entity.to_update_payload());
        self.write(ApiRequest::json(Method::PUT, url, &body)).await
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn search(&self, filter: Value) -> Result<crate::transport::ApiResponse, ClientError> {
        let url = endpoint(&self.read_url, &["v1", "entities", "search"])?;
        let response = self
            .transport
            .send(ApiRequest::json(Method::POST, url, &filter))
            .await?;
        Ok(response)
    }

    async fn search_kind(&self, major: &str) -> Result<Vec<Record>, ClientError> {
        let response = self.search(json!({ "kind": { "major": major } })).await?;
        if response.is_not_found() {
            tracing::debug!(major, "no entities of this kind");
            return Ok(Vec::new());
        }
        if !response.is_success() {
            return Err(ClientError::from_response(&response, "error"));
        }

        let records = match parse_search_body(&response.body) {
            Ok(Unwrapped::Records(records)) => records,
            Ok(Unwrapped::Absent) => Vec::new(),
            Ok(Unwrapped::Unrecognized(payload)) => {
                tracing::warn!(major, %payload, "unrecognized search payload, treating as empty");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(major, %err, "malformed search body, treating as empty");
                Vec::new()
            }
        };

        Ok(records.into_iter().filter_map(into_record).collect())
    }

    async fn write(&self, request: ApiRequest) -> Result<Record, ClientError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ClientError::from_response(&response, "error"));
        }
        if response.body.trim_ascii().is_empty() {
            return Ok(Record::new());
        }

        match serde_json::from_slice::<Value>(&response.body)? {
            Value::Object(mut record) => {
                normalize_record_name(&mut record);
                Ok(record)
            }
            other => Err(ClientError::UnexpectedPayload(other)),
        }
    }
}

fn into_record(value: Value) -> Option<Record> {
    match value {
        Value::Object(mut record) => {
            normalize_record_name(&mut record);
            Some(record)
        }
        other => {
            tracing::warn!(%other, "skipping non-object search result");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
