use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::EventId,
    protocol::{Event, EventPayload, Organization},
};

pub mod config;
pub mod error;
pub mod fetcher;
pub mod form;
pub mod format;
pub mod orchestrator;
pub mod selector;
pub mod store;

pub use config::{load_api_config, ApiConfig, ConfigSources};
pub use error::ClientError;
pub use fetcher::{FetchSlot, FetchState, FetchTicket};
pub use form::{EventDraft, EventForm};
pub use orchestrator::{
    CrudOperation, CrudOrchestrator, CrudOutcome, CrudRequest, Mutation, Notifier, Prompt,
    DELETE_PROMPT,
};
pub use selector::OrgSelector;
pub use store::EventStore;

/// The REST surface the client consumes.
#[async_trait]
pub trait EventsBackend: Send + Sync {
    async fn list_orgs(&self) -> Result<Vec<Organization>, ClientError>;
    async fn list_events(&self) -> Result<Vec<Event>, ClientError>;
    async fn create_event(&self, payload: &EventPayload) -> Result<Event, ClientError>;
    async fn update_event(&self, id: EventId, payload: &EventPayload)
        -> Result<Event, ClientError>;
    async fn delete_event(&self, id: EventId) -> Result<(), ClientError>;
}

#[async_trait]
impl<T> EventsBackend for Arc<T>
where
    T: EventsBackend + ?Sized,
{
    async fn list_orgs(&self) -> Result<Vec<Organization>, ClientError> {
        (**self).list_orgs().await
    }

    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        (**self).list_events().await
    }

    async fn create_event(&self, payload: &EventPayload) -> Result<Event, ClientError> {
        (**self).create_event(payload).await
    }

    async fn update_event(
        &self,
        id: EventId,
        payload: &EventPayload,
    ) -> Result<Event, ClientError> {
        (**self).update_event(id, payload).await
    }

    async fn delete_event(&self, id: EventId) -> Result<(), ClientError> {
        (**self).delete_event(id).await
    }
}

#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Client,
    config: ApiConfig,
}

impl EventsClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// One GET against `locator`, no retry. Non-success statuses are errors.
    pub async fn fetch_json<T: DeserializeOwned>(&self, locator: &str) -> Result<T, ClientError> {
        tracing::debug!(locator, "fetching");
        self.send(self.http.get(locator)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let res = request.send().await.map_err(ClientError::Network)?;
        decode_json(res).await
    }
}

async fn decode_json<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
        });
    }
    let body = res.bytes().await?;
    serde_json::from_slice(&body).map_err(ClientError::Decode)
}

#[async_trait]
impl EventsBackend for EventsClient {
    async fn list_orgs(&self) -> Result<Vec<Organization>, ClientError> {
        self.fetch_json(&self.config.orgs_url()).await
    }

    async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.fetch_json(&self.config.events_url()).await
    }

    async fn create_event(&self, payload: &EventPayload) -> Result<Event, ClientError> {
        self.send(self.http.post(self.config.events_url()).json(payload))
            .await
    }

    async fn update_event(
        &self,
        id: EventId,
        payload: &EventPayload,
    ) -> Result<Event, ClientError> {
        self.send(self.http.put(self.config.event_url(id)).json(payload))
            .await
    }

    async fn delete_event(&self, id: EventId) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(self.config.event_url(id))
            .send()
            .await
            .map_err(ClientError::Network)?;
        if !res.status().is_success() {
            return Err(ClientError::Status {
                status: res.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
