//! Generation-tagged fetch slots.
//!
//! A slot is one logical piece of remote data (the organization list, the
//! event list). Each request hands out a [`FetchTicket`]; only the ticket from
//! the newest request may settle the slot, so results from an outdated
//! locator or from a torn-down view are dropped instead of applied.

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct FetchSlot<T> {
    name: &'static str,
    locator: Option<String>,
    generation: u64,
    cancelled: bool,
    state: FetchState<T>,
}

impl<T> FetchSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            locator: None,
            generation: 0,
            cancelled: false,
            state: FetchState::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Starts a request for `locator` unless that locator is already the
    /// current one. Any ticket handed out earlier becomes stale.
    pub fn request(&mut self, locator: &str) -> Option<FetchTicket> {
        if self.cancelled || self.locator.as_deref() == Some(locator) {
            return None;
        }
        self.locator = Some(locator.to_string());
        Some(self.issue())
    }

    /// Re-issues the current locator, superseding whatever is in flight.
    pub fn reload(&mut self) -> Option<FetchTicket> {
        if self.cancelled || self.locator.is_none() {
            return None;
        }
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state.loading = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Applies an outcome if `ticket` is still the newest one. Returns whether
    /// the slot changed.
    pub fn settle(&mut self, ticket: FetchTicket, outcome: Result<T, ClientError>) -> bool {
        if self.cancelled || ticket.generation != self.generation {
            tracing::warn!(
                slot = self.name,
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        match outcome {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(err) => {
                tracing::error!(slot = self.name, "fetch failed: {err}");
                self.state.error = Some(err.to_string());
            }
        }
        self.state.loading = false;
        true
    }

    /// Tears the slot down. Nothing in flight will be applied afterwards.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.generation += 1;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
