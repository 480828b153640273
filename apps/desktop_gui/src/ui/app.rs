use std::time::Duration;

use client_core::{
    format, ApiConfig, CrudOperation, CrudRequest, EventForm, EventStore, FetchSlot, FetchTicket,
    Mutation, OrgSelector,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{EventId, OrgId},
    protocol::{Event, Organization},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::modal::{DeleteConfirmation, EventModal, ModalAction};

const DESCRIPTION_PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

enum RowAction {
    Edit(EventId),
    Delete(EventId),
}

pub struct EventsApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    config: ApiConfig,

    orgs: FetchSlot<Vec<Organization>>,
    events: FetchSlot<Vec<Event>>,
    store: EventStore,
    selector: OrgSelector,
    form: EventForm,

    modal: EventModal,
    delete_confirmation: DeleteConfirmation,

    status: String,
    status_banner: Option<StatusBanner>,
}

impl EventsApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, config: ApiConfig) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            config,
            orgs: FetchSlot::new("orgs"),
            events: FetchSlot::new("events"),
            store: EventStore::new(),
            selector: OrgSelector::new(),
            form: EventForm::new(),
            modal: EventModal::new(),
            delete_confirmation: DeleteConfirmation::default(),
            status: "Loading...".to_string(),
            status_banner: None,
        };
        app.start_fetches();
        app
    }

    fn start_fetches(&mut self) {
        let orgs_url = self.config.orgs_url();
        if let Some(ticket) = self.orgs.request(&orgs_url) {
            self.queue_orgs_fetch(ticket, orgs_url);
        }
        let events_url = self.config.events_url();
        if let Some(ticket) = self.events.request(&events_url) {
            self.queue_events_fetch(ticket, events_url);
        }
    }

    fn refresh(&mut self) {
        tracing::info!("refreshing organizations and events");
        if let Some(ticket) = self.orgs.reload() {
            self.queue_orgs_fetch(ticket, self.config.orgs_url());
        }
        if let Some(ticket) = self.events.reload() {
            self.queue_events_fetch(ticket, self.config.events_url());
        }
    }

    fn queue_orgs_fetch(&mut self, ticket: FetchTicket, locator: String) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchOrgs { ticket, locator },
            &mut self.status,
        );
    }

    fn queue_events_fetch(&mut self, ticket: FetchTicket, locator: String) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchEvents { ticket, locator },
            &mut self.status,
        );
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => self.show_error(err),
                UiEvent::OrgsSettled { ticket, result } => {
                    if self.orgs.settle(ticket, result) {
                        if let Some(orgs) = self.orgs.data() {
                            tracing::info!(count = orgs.len(), "organizations loaded");
                            self.selector.populate(orgs.clone());
                        }
                    }
                }
                UiEvent::EventsSettled { ticket, result } => {
                    if self.events.settle(ticket, result) {
                        if let Some(events) = self.events.data() {
                            tracing::info!(count = events.len(), "events loaded");
                            self.store.seed(events.clone());
                            self.status = format!("{} events", self.store.len());
                        }
                    }
                }
                UiEvent::MutationSettled {
                    operation,
                    session,
                    result,
                } => self.apply_mutation_result(operation, session, result),
            }
        }
    }

    fn apply_mutation_result(
        &mut self,
        operation: CrudOperation,
        session: Option<u64>,
        result: Result<Mutation, client_core::ClientError>,
    ) {
        let owns_modal = session == Some(self.modal.session());
        if session.is_some() && !owns_modal {
            tracing::debug!(
                operation = operation.name(),
                "save settled for a closed modal session"
            );
        }
        match result {
            Ok(mutation) => {
                let saved = matches!(mutation, Mutation::Created(_) | Mutation::Updated(_));
                mutation.apply(&mut self.store);
                if saved && owns_modal {
                    self.form.finish();
                    self.modal.hide();
                }
                self.status = match operation {
                    CrudOperation::Create => "Event created".to_string(),
                    CrudOperation::Update => "Event updated".to_string(),
                    CrudOperation::Delete => "Event deleted".to_string(),
                };
            }
            Err(err) => {
                let message = operation.failure_message(&err);
                tracing::error!(operation = operation.name(), "{message}");
                if owns_modal {
                    self.modal.end_submit();
                }
                self.show_error(
                    UiError::from_client_error(UiErrorContext::from(operation), &err)
                        .with_message(message),
                );
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(
            category = ?err.category(),
            context = ?err.context(),
            "{}",
            err.message()
        );
        self.status_banner = Some(StatusBanner {
            message: err.message().to_string(),
        });
    }

    fn open_create_modal(&mut self) {
        self.form.open_create(self.selector.selected());
        self.modal.show();
    }

    fn open_edit_modal(&mut self, id: EventId) -> Result<(), UiError> {
        let event = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| UiError::precondition(format!("event {id} is not loaded")))?;
        self.form.open_edit(&event);
        self.modal.show();
        Ok(())
    }

    fn submit_form(&mut self) {
        if !self.form.missing_required().is_empty() {
            return;
        }
        let payload = match self.form.draft().to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.show_error(UiError::from_client_error(UiErrorContext::SaveEvent, &err));
                return;
            }
        };
        let request = match self.form.editing() {
            Some(id) => CrudRequest::Update(id, payload),
            None => CrudRequest::Create(payload),
        };
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Submit {
                request,
                session: Some(self.modal.session()),
            },
            &mut self.status,
        ) {
            self.modal.begin_submit();
        }
    }

    fn confirm_delete(&mut self, id: EventId) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Submit {
                request: CrudRequest::Delete(id),
                session: None,
            },
            &mut self.status,
        );
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(6.0);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let selected = self.selector.selected();
                ui.vertical(|ui| {
                    ui.heading(format::header_title(selected));
                    ui.label(egui::RichText::new(format::header_tagline(selected)).weak());
                    if let Some(logo) = selected.and_then(|org| org.logo.as_deref()) {
                        ui.hyperlink_to(egui::RichText::new("logo").small(), logo);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Refresh").clicked() {
                        self.refresh();
                    }
                    if ui.button("+ Create Event").clicked() {
                        self.open_create_modal();
                    }
                });
            });
            ui.add_space(8.0);
        });
    }

    fn show_org_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("org_panel")
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new("Organization").strong().size(16.0));
                    if self.orgs.is_loading() {
                        ui.label("Loading orgs...");
                        return;
                    }
                    if let Some(err) = self.orgs.error() {
                        ui.small(egui::RichText::new(err).weak());
                    }

                    let mut chosen: Option<OrgId> = None;
                    let selected_text = self
                        .selector
                        .selected()
                        .map(|org| org.name.clone())
                        .unwrap_or_default();
                    egui::ComboBox::from_id_salt("org_select")
                        .selected_text(selected_text)
                        .width(ui.available_width())
                        .show_ui(ui, |ui| {
                            for org in self.selector.orgs() {
                                let is_selected = self.selector.selected_id() == Some(org.id);
                                if ui.selectable_label(is_selected, org.name.as_str()).clicked() {
                                    chosen = Some(org.id);
                                }
                            }
                        });
                    if let Some(id) = chosen {
                        self.selector.select(id);
                    }

                    if let Some(org) = self.selector.selected() {
                        ui.add_space(6.0);
                        ui.label(format!(
                            "Contact: {}",
                            org.contact.as_deref().unwrap_or_default()
                        ));
                        ui.label(format!("Email: {}", org.email.as_deref().unwrap_or_default()));
                        if let Some(description) = org.description.as_deref() {
                            ui.label(egui::RichText::new(description).weak());
                        }
                    }
                });

                ui.add_space(10.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new("Quick stats").strong());
                    ui.columns(2, |cols| {
                        stat(&mut cols[0], self.store.len(), "Upcoming");
                        stat(&mut cols[1], self.selector.orgs().len(), "Orgs");
                    });
                });
            });
    }

    fn show_event_list(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            ui.heading("Events");
            ui.separator();

            if self.events.is_loading() {
                ui.label("Loading events...");
                return;
            }
            if let Some(err) = self.events.error() {
                ui.small(egui::RichText::new(err).weak());
            }

            let mut action: Option<RowAction> = None;
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for event in self.store.events() {
                        if let Some(row_action) = event_row(ui, event) {
                            action = Some(row_action);
                        }
                    }
                });

            match action {
                Some(RowAction::Edit(id)) => {
                    if let Err(err) = self.open_edit_modal(id) {
                        self.show_error(err);
                    }
                }
                Some(RowAction::Delete(id)) => self.delete_confirmation.ask(id),
                None => {}
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
    }
}

fn stat(ui: &mut egui::Ui, value: usize, label: &str) {
    ui.label(egui::RichText::new(value.to_string()).size(22.0).strong());
    ui.small(egui::RichText::new(label).weak());
}

fn event_row(ui: &mut egui::Ui, event: &Event) -> Option<RowAction> {
    let mut action = None;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&event.title).strong().size(16.0));
                ui.small(egui::RichText::new(format::event_date(event)).weak());
                if let Some(description) = event.description.as_deref() {
                    ui.label(format::truncate(description, DESCRIPTION_PREVIEW_CHARS));
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                ui.vertical(|ui| {
                    if ui.small_button("Edit").clicked() {
                        action = Some(RowAction::Edit(event.id));
                    }
                    if ui.small_button("Delete").clicked() {
                        action = Some(RowAction::Delete(event.id));
                    }
                });
                ui.vertical(|ui| {
                    ui.label(event.venue.as_deref().unwrap_or_default());
                    ui.small(egui::RichText::new(format::hosted_by(event)).weak());
                });
            });
        });
    });
    ui.add_space(4.0);
    action
}

impl eframe::App for EventsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_org_panel(ctx);
        self.show_event_list(ctx);

        if self.modal.render(ctx, &mut self.form, self.selector.orgs()) == ModalAction::Save {
            self.submit_form();
        }
        if let Some(id) = self.delete_confirmation.render(ctx) {
            self.confirm_delete(id);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
