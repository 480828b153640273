use shared::{
    domain::{EventId, FormField, OrgId},
    protocol::{Event, EventPayload, Organization},
};

use crate::error::ClientError;

/// Unvalidated text for every editable event field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub venue: String,
    pub org_id: String,
    pub description: String,
}

impl EventDraft {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Date => &self.date,
            FormField::Venue => &self.venue,
            FormField::OrgId => &self.org_id,
            FormField::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Date => &mut self.date,
            FormField::Venue => &mut self.venue,
            FormField::OrgId => &mut self.org_id,
            FormField::Description => &mut self.description,
        }
    }

    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date.clone().unwrap_or_default(),
            venue: event.venue.clone().unwrap_or_default(),
            org_id: event.org_id.map(|id| id.to_string()).unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
        }
    }

    /// Builds the request body. Only the organization id is interpreted;
    /// everything else is sent as typed.
    pub fn to_payload(&self) -> Result<EventPayload, ClientError> {
        let org_id = match self.org_id.trim() {
            "" => None,
            raw => Some(OrgId(raw.parse::<i64>().map_err(|_| {
                ClientError::InvalidDraft(format!("organization id '{raw}' is not a number"))
            })?)),
        };
        Ok(EventPayload {
            title: self.title.clone(),
            date: self.date.clone(),
            venue: self.venue.clone(),
            description: self.description.clone(),
            org_id,
        })
    }
}

/// Draft state behind the create/edit modal.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    draft: EventDraft,
    editing: Option<EventId>,
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_create(&mut self, selected_org: Option<&Organization>) {
        self.editing = None;
        self.draft = EventDraft {
            org_id: selected_org
                .map(|org| org.id.to_string())
                .unwrap_or_default(),
            ..EventDraft::default()
        };
    }

    pub fn open_edit(&mut self, event: &Event) {
        self.editing = Some(event.id);
        self.draft = EventDraft::from_event(event);
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
    }

    /// Applies a change addressed by wire name. Unknown names are ignored.
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> bool {
        match FormField::from_name(name) {
            Some(field) => {
                self.set_field(field, value);
                true
            }
            None => false,
        }
    }

    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.draft.field(*field).trim().is_empty())
            .collect()
    }

    /// Called once a save lands so the next open starts clean.
    pub fn finish(&mut self) {
        self.editing = None;
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EventDraft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<EventId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
