//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{ClientError, CrudOperation, FetchTicket, Mutation};
use shared::protocol::{Event, Organization};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    OrgsSettled {
        ticket: FetchTicket,
        result: Result<Vec<Organization>, ClientError>,
    },
    EventsSettled {
        ticket: FetchTicket,
        result: Result<Vec<Event>, ClientError>,
    },
    MutationSettled {
        operation: CrudOperation,
        session: Option<u64>,
        result: Result<Mutation, ClientError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Http,
    Decode,
    Validation,
    Precondition,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SaveEvent,
    DeleteEvent,
    EventModal,
}

impl From<CrudOperation> for UiErrorContext {
    fn from(value: CrudOperation) -> Self {
        match value {
            CrudOperation::Create | CrudOperation::Update => UiErrorContext::SaveEvent,
            CrudOperation::Delete => UiErrorContext::DeleteEvent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("precondition") {
            UiErrorCategory::Precondition
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Network(_) => UiErrorCategory::Transport,
            ClientError::Status { .. } => UiErrorCategory::Http,
            ClientError::Decode(_) => UiErrorCategory::Decode,
            ClientError::InvalidDraft(_) | ClientError::Config(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Modal actions that cannot run because their target is gone.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Precondition,
            context: UiErrorContext::EventModal,
            message: format!("precondition failed: {}", message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_client_errors_by_variant() {
        let err = UiError::from_client_error(
            UiErrorContext::SaveEvent,
            &ClientError::Status { status: 500 },
        );
        assert_eq!(err.category(), UiErrorCategory::Http);
        assert_eq!(err.context(), UiErrorContext::SaveEvent);
        assert_eq!(err.message(), "request failed with status 500");

        let err = UiError::from_client_error(
            UiErrorContext::SaveEvent,
            &ClientError::InvalidDraft("organization id 'x' is not a number".to_string()),
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn classifies_worker_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend worker disconnected; restart the app",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn precondition_errors_are_tagged_for_the_modal() {
        let err = UiError::precondition("event 4 is not loaded");
        assert_eq!(err.category(), UiErrorCategory::Precondition);
        assert_eq!(err.context(), UiErrorContext::EventModal);
        assert_eq!(err.message(), "precondition failed: event 4 is not loaded");
    }

    #[test]
    fn crud_operations_map_to_contexts() {
        assert_eq!(
            UiErrorContext::from(CrudOperation::Update),
            UiErrorContext::SaveEvent
        );
        assert_eq!(
            UiErrorContext::from(CrudOperation::Delete),
            UiErrorContext::DeleteEvent
        );
    }
}
