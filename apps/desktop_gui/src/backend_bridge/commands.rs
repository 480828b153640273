//! Backend commands queued from UI to backend worker.

use client_core::{CrudRequest, FetchTicket};

pub enum BackendCommand {
    FetchOrgs { ticket: FetchTicket, locator: String },
    FetchEvents { ticket: FetchTicket, locator: String },
    /// `session` is the modal session a save was issued from; deletes carry `None`.
    Submit {
        request: CrudRequest,
        session: Option<u64>,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchOrgs { .. } => "fetch_orgs",
            BackendCommand::FetchEvents { .. } => "fetch_events",
            BackendCommand::Submit { request, .. } => request.operation().name(),
        }
    }
}
