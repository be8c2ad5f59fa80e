//! Request generations and per-node load state.

use std::collections::HashMap;

/// Identifies one child fetch for one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub id: String,
    pub generation: u64,
}

/// Identifies one search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTicket {
    pub query: String,
    pub generation: u64,
}

/// Load state of a single node, for the expand control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No fetch issued, or the last one was invalidated.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Children were merged into the tree.
    Ready,
    /// The last fetch failed.
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Hands out request generations and decides which completions still apply.
///
/// Generations are drawn from one monotonically increasing counter shared
/// by loads and searches.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
    pending: HashMap<String, u64>,
    states: HashMap<String, LoadState>,
    latest_search: Option<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    /// Issues a child fetch ticket for `id`, superseding any in-flight one.
    pub fn issue_load(&mut self, id: &str) -> LoadTicket {
        let generation = self.bump();
        if self.pending.insert(id.to_string(), generation).is_some() {
            log::debug!("expand of {} superseded by gen {}", id, generation);
        }
        self.states.insert(id.to_string(), LoadState::Loading);
        LoadTicket {
            id: id.to_string(),
            generation,
        }
    }

    /// Returns `true` if the ticket is the newest one for its node.
    pub fn is_current_load(&self, ticket: &LoadTicket) -> bool {
        self.pending.get(&ticket.id) == Some(&ticket.generation)
    }

    /// Settles a completed fetch.
    ///
    /// Returns `false` for a stale ticket, leaving all state untouched.
    pub fn settle_load(&mut self, ticket: &LoadTicket, failure: Option<String>) -> bool {
        if !self.is_current_load(ticket) {
            return false;
        }
        self.pending.remove(&ticket.id);
        let state = match failure {
            Some(message) => LoadState::Failed(message),
            None => LoadState::Ready,
        };
        self.states.insert(ticket.id.clone(), state);
        true
    }

    /// Forgets every in-flight fetch and all load states.
    ///
    /// Called when the tree is replaced; nodes from the old tree may not
    /// exist in the new one.
    pub fn invalidate_loads(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("dropping {} in-flight expands", self.pending.len());
        }
        self.pending.clear();
        self.states.clear();
    }

    /// Issues a search ticket, superseding any earlier search.
    pub fn issue_search(&mut self, query: &str) -> SearchTicket {
        let generation = self.bump();
        self.latest_search = Some(generation);
        SearchTicket {
            query: query.to_string(),
            generation,
        }
    }

    /// Returns `true` if the ticket belongs to the newest search.
    pub fn is_current_search(&self, ticket: &SearchTicket) -> bool {
        self.latest_search == Some(ticket.generation)
    }

    /// Settles a completed search. Returns `false` for a stale ticket.
    pub fn settle_search(&mut self, ticket: &SearchTicket) -> bool {
        if !self.is_current_search(ticket) {
            return false;
        }
        self.latest_search = None;
        true
    }

    /// Makes every outstanding search stale.
    pub fn invalidate_search(&mut self) {
        self.latest_search = None;
    }

    /// Load state of the node with the given id.
    pub fn state(&self, id: &str) -> LoadState {
        self.states.get(id).cloned().unwrap_or_default()
    }

    /// Number of fetches in flight.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }
}
