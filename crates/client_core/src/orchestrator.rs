//! Create/update/delete against the backend, reconciling the local store
//! only after the backend confirms.

use shared::{
    domain::EventId,
    protocol::{Event, EventPayload},
};

use crate::{
    error::ClientError,
    form::{EventDraft, EventForm},
    store::EventStore,
    EventsBackend,
};

pub const DELETE_PROMPT: &str = "Delete this event?";

/// Asks the user a yes/no question before a destructive call.
pub trait Prompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// Surfaces a failed mutation to the user.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOperation {
    Create,
    Update,
    Delete,
}

impl CrudOperation {
    pub fn name(self) -> &'static str {
        match self {
            CrudOperation::Create => "create_event",
            CrudOperation::Update => "update_event",
            CrudOperation::Delete => "delete_event",
        }
    }

    pub fn failure_message(self, err: &ClientError) -> String {
        match self {
            CrudOperation::Create | CrudOperation::Update => format!("Error: {err}"),
            CrudOperation::Delete => format!("Delete failed: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudRequest {
    Create(EventPayload),
    Update(EventId, EventPayload),
    Delete(EventId),
}

impl CrudRequest {
    pub fn operation(&self) -> CrudOperation {
        match self {
            CrudRequest::Create(_) => CrudOperation::Create,
            CrudRequest::Update(..) => CrudOperation::Update,
            CrudRequest::Delete(_) => CrudOperation::Delete,
        }
    }
}

/// A backend-confirmed change waiting to be applied to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Created(Event),
    Updated(Event),
    Deleted(EventId),
}

impl Mutation {
    pub fn apply(self, store: &mut EventStore) {
        match self {
            Mutation::Created(event) => store.prepend(event),
            Mutation::Updated(event) => {
                let id = event.id;
                if !store.replace(event) {
                    tracing::warn!(event_id = id.0, "updated event is not in the local store");
                }
            }
            Mutation::Deleted(id) => {
                store.remove(id);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudOutcome {
    Applied,
    Cancelled,
    Failed(String),
}

pub struct CrudOrchestrator<B> {
    backend: B,
}

impl<B: EventsBackend> CrudOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Network half of a mutation. The store is untouched.
    pub async fn submit(&self, request: CrudRequest) -> Result<Mutation, ClientError> {
        tracing::info!(operation = request.operation().name(), "submitting");
        match request {
            CrudRequest::Create(payload) => self
                .backend
                .create_event(&payload)
                .await
                .map(Mutation::Created),
            CrudRequest::Update(id, payload) => self
                .backend
                .update_event(id, &payload)
                .await
                .map(Mutation::Updated),
            CrudRequest::Delete(id) => {
                self.backend.delete_event(id).await?;
                Ok(Mutation::Deleted(id))
            }
        }
    }

    pub async fn create(
        &self,
        store: &mut EventStore,
        draft: &EventDraft,
        notifier: &dyn Notifier,
    ) -> CrudOutcome {
        match draft.to_payload() {
            Ok(payload) => self.run(store, CrudRequest::Create(payload), notifier).await,
            Err(err) => fail(CrudOperation::Create, err, notifier),
        }
    }

    pub async fn update(
        &self,
        store: &mut EventStore,
        id: EventId,
        draft: &EventDraft,
        notifier: &dyn Notifier,
    ) -> CrudOutcome {
        match draft.to_payload() {
            Ok(payload) => {
                self.run(store, CrudRequest::Update(id, payload), notifier)
                    .await
            }
            Err(err) => fail(CrudOperation::Update, err, notifier),
        }
    }

    /// Creates or updates depending on what the form was opened for.
    pub async fn save(
        &self,
        store: &mut EventStore,
        form: &mut EventForm,
        notifier: &dyn Notifier,
    ) -> CrudOutcome {
        let outcome = match form.editing() {
            Some(id) => self.update(store, id, form.draft(), notifier).await,
            None => self.create(store, form.draft(), notifier).await,
        };
        if outcome == CrudOutcome::Applied {
            form.finish();
        }
        outcome
    }

    pub async fn delete(
        &self,
        store: &mut EventStore,
        id: EventId,
        prompt: &dyn Prompt,
        notifier: &dyn Notifier,
    ) -> CrudOutcome {
        if !prompt.confirm(DELETE_PROMPT) {
            tracing::debug!(event_id = id.0, "delete declined");
            return CrudOutcome::Cancelled;
        }
        self.run(store, CrudRequest::Delete(id), notifier).await
    }

    async fn run(
        &self,
        store: &mut EventStore,
        request: CrudRequest,
        notifier: &dyn Notifier,
    ) -> CrudOutcome {
        let operation = request.operation();
        match self.submit(request).await {
            Ok(mutation) => {
                mutation.apply(store);
                CrudOutcome::Applied
            }
            Err(err) => fail(operation, err, notifier),
        }
    }
}

fn fail(operation: CrudOperation, err: ClientError, notifier: &dyn Notifier) -> CrudOutcome {
    let message = operation.failure_message(&err);
    tracing::error!(operation = operation.name(), "{message}");
    notifier.alert(&message);
    CrudOutcome::Failed(message)
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
