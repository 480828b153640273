use shared::{domain::EventId, protocol::Event};

/// Client-local list of events, seeded from the last fetch and patched in
/// place by completed mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// Puts `event` at the head; an entry already carrying its id is dropped.
    pub fn prepend(&mut self, event: Event) {
        self.events.retain(|it| it.id != event.id);
        self.events.insert(0, event);
    }

    /// Replaces every entry sharing `event.id`. Returns false when nothing matched.
    pub fn replace(&mut self, event: Event) -> bool {
        let mut replaced = false;
        for slot in self.events.iter_mut().filter(|it| it.id == event.id) {
            *slot = event.clone();
            replaced = true;
        }
        replaced
    }

    pub fn remove(&mut self, id: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|it| it.id != id);
        self.events.len() != before
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|it| it.id == id)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
