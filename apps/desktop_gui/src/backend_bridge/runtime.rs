//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{CrudOrchestrator, EventsClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker thread. Every command runs as its own task, so the two
/// list fetches and any CRUD submissions proceed independently.
pub fn launch(client: EventsClient, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let base_url = client.config().base_url().to_string();
            tracing::info!(base_url = %base_url, "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(format!("Using backend at {base_url}")));
            let orchestrator = Arc::new(CrudOrchestrator::new(Arc::new(client)));

            while let Ok(cmd) = cmd_rx.recv() {
                let orchestrator = Arc::clone(&orchestrator);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(&orchestrator, cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui closed before backend result was delivered");
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn run_command(
    orchestrator: &CrudOrchestrator<Arc<EventsClient>>,
    cmd: BackendCommand,
) -> UiEvent {
    tracing::debug!(command = cmd.name(), "backend: handling command");
    match cmd {
        BackendCommand::FetchOrgs { ticket, locator } => UiEvent::OrgsSettled {
            ticket,
            result: orchestrator.backend().fetch_json(&locator).await,
        },
        BackendCommand::FetchEvents { ticket, locator } => UiEvent::EventsSettled {
            ticket,
            result: orchestrator.backend().fetch_json(&locator).await,
        },
        BackendCommand::Submit { request, session } => {
            let operation = request.operation();
            UiEvent::MutationSettled {
                operation,
                session,
                result: orchestrator.submit(request).await,
            }
        }
    }
}
