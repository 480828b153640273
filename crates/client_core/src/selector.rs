use shared::{domain::OrgId, protocol::Organization};

/// Tracks the fetched organizations and which one the user is looking at.
#[derive(Debug, Clone, Default)]
pub struct OrgSelector {
    orgs: Vec<Organization>,
    selected: Option<OrgId>,
}

impl OrgSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the known organizations and defaults the selection to the first.
    pub fn populate(&mut self, orgs: Vec<Organization>) {
        if let Some(first) = orgs.first() {
            self.selected = Some(first.id);
        }
        self.orgs = orgs;
    }

    /// Selects `id`. An id that matches no organization clears the selection.
    pub fn select(&mut self, id: OrgId) -> bool {
        let found = self.orgs.iter().any(|org| org.id == id);
        self.selected = found.then_some(id);
        found
    }

    pub fn selected(&self) -> Option<&Organization> {
        let id = self.selected?;
        self.orgs.iter().find(|org| org.id == id)
    }

    pub fn selected_id(&self) -> Option<OrgId> {
        self.selected
    }

    pub fn orgs(&self) -> &[Organization] {
        &self.orgs
    }

    pub fn find(&self, id: OrgId) -> Option<&Organization> {
        self.orgs.iter().find(|org| org.id == id)
    }
}
