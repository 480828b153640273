//! The create/edit event window and the delete confirmation dialog.
//!
//! Both are plain values owned by the app; nothing is looked up at call time.

use client_core::{EventForm, DELETE_PROMPT};
use eframe::egui;
use shared::{
    domain::{EventId, FormField},
    protocol::Organization,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Save,
    Cancel,
}

#[derive(Debug, Default)]
pub struct EventModal {
    open: bool,
    submitting: bool,
    session: u64,
}

impl EventModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a fresh session; responses tagged with an older one no longer
    /// drive the window.
    pub fn show(&mut self) {
        self.session = self.session.wrapping_add(1);
        self.open = true;
        self.submitting = false;
    }

    pub fn hide(&mut self) {
        self.open = false;
        self.submitting = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    /// Re-enables Save after a failed submission; the draft stays as typed.
    pub fn end_submit(&mut self) {
        self.submitting = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn render(
        &mut self,
        ctx: &egui::Context,
        form: &mut EventForm,
        orgs: &[Organization],
    ) -> ModalAction {
        if !self.open {
            return ModalAction::None;
        }

        let title = if form.is_editing() {
            "Edit Event"
        } else {
            "Create Event"
        };
        let mut window_open = true;
        let mut action = ModalAction::None;
        let submitting = self.is_submitting();

        egui::Window::new(title)
            .id(egui::Id::new("event_modal"))
            .open(&mut window_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(380.0);
                text_field(ui, form, FormField::Title, "Title", "");
                text_field(
                    ui,
                    form,
                    FormField::Date,
                    "Date & Time",
                    "YYYY-MM-DDTHH:MM",
                );
                text_field(ui, form, FormField::Venue, "Venue", "");

                ui.label(egui::RichText::new("Organizer").strong());
                let org_field = form.draft_mut().field_mut(FormField::OrgId);
                let selected_text = orgs
                    .iter()
                    .find(|org| org.id.to_string() == *org_field)
                    .map(|org| org.name.clone())
                    .unwrap_or_else(|| "Select".to_string());
                egui::ComboBox::from_id_salt("event_modal_org")
                    .selected_text(selected_text)
                    .width(ui.available_width())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(org_field, String::new(), "Select");
                        for org in orgs {
                            ui.selectable_value(org_field, org.id.to_string(), org.name.as_str());
                        }
                    });
                ui.add_space(6.0);

                ui.label(egui::RichText::new("Description").strong());
                ui.add(
                    egui::TextEdit::multiline(form.draft_mut().field_mut(FormField::Description))
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );

                let missing = form.missing_required();
                if !missing.is_empty() {
                    let names: Vec<_> = missing.iter().map(|field| field.name()).collect();
                    ui.small(
                        egui::RichText::new(format!("Required: {}", names.join(", ")))
                            .color(ui.visuals().warn_fg_color),
                    );
                }

                ui.separator();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let save = ui.add_enabled(
                        missing.is_empty() && !submitting,
                        egui::Button::new(if submitting { "Saving..." } else { "Save" }),
                    );
                    if save.clicked() {
                        action = ModalAction::Save;
                    }
                    if ui.button("Cancel").clicked() {
                        action = ModalAction::Cancel;
                    }
                });
            });

        if !window_open {
            action = ModalAction::Cancel;
        }
        if action == ModalAction::Cancel {
            self.hide();
        }
        action
    }
}

fn text_field(ui: &mut egui::Ui, form: &mut EventForm, field: FormField, label: &str, hint: &str) {
    ui.label(egui::RichText::new(label).strong());
    ui.add(
        egui::TextEdit::singleline(form.draft_mut().field_mut(field))
            .id_salt(field.name())
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
}

/// Pending delete awaiting a yes/no answer.
#[derive(Debug, Default)]
pub struct DeleteConfirmation {
    pending: Option<EventId>,
}

impl DeleteConfirmation {
    pub fn ask(&mut self, id: EventId) {
        self.pending = Some(id);
    }

    /// Returns the confirmed id once the user answers yes.
    pub fn answer(&mut self, confirmed: bool) -> Option<EventId> {
        let id = self.pending.take()?;
        confirmed.then_some(id)
    }

    pub fn render(&mut self, ctx: &egui::Context) -> Option<EventId> {
        self.pending?;

        let mut answer = None;
        egui::Window::new("Confirm")
            .id(egui::Id::new("delete_confirmation"))
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(DELETE_PROMPT);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        answer.and_then(|confirmed| self.answer(confirmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_yields_id_only_when_accepted() {
        let mut confirm = DeleteConfirmation::default();
        assert_eq!(confirm.answer(true), None);

        confirm.ask(EventId(3));
        assert_eq!(confirm.answer(false), None);
        assert_eq!(confirm.answer(true), None);

        confirm.ask(EventId(4));
        assert_eq!(confirm.answer(true), Some(EventId(4)));
    }

    #[test]
    fn modal_tracks_submission_state() {
        let mut modal = EventModal::new();
        modal.show();
        modal.begin_submit();
        assert!(modal.is_submitting());
        modal.end_submit();
        assert!(modal.is_open());
        assert!(!modal.is_submitting());
        modal.hide();
        assert!(!modal.is_open());
    }

    #[test]
    fn each_show_starts_a_new_session() {
        let mut modal = EventModal::new();
        modal.show();
        let first = modal.session();
        modal.hide();
        assert_eq!(modal.session(), first);
        modal.show();
        assert_ne!(modal.session(), first);
    }
}
