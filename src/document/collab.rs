//! # Collaboration
//!
//! Optional shared-editing capability of a model's backing store.
//! Only the roster of participants is modelled here; transport is the
//! host's business. A model without a session, or a session without a
//! roster, simply has collaboration disabled.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::events::{ReadySignal, ReadyWaiter, Signal};

/// A participant in a shared-editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collaborator {
    pub user_id: String,
    /// Identifier keyed into editor selections
    pub session_id: String,
    pub display_name: String,
    pub color: String,
}

impl Collaborator {
    pub fn new(user_id: &str, session_id: &str, display_name: &str, color: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            display_name: display_name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Set of participants currently present, keyed by session id
#[derive(Debug)]
pub struct CollaboratorRoster {
    local: Collaborator,
    members: RefCell<BTreeMap<String, Collaborator>>,
    /// Emitted after every membership change
    pub changed: Signal<()>,
}

impl CollaboratorRoster {
    /// Create a roster containing only the local participant
    pub fn new(local: Collaborator) -> Self {
        let mut members = BTreeMap::new();
        members.insert(local.session_id.clone(), local.clone());
        Self {
            local,
            members: RefCell::new(members),
            changed: Signal::new(),
        }
    }

    pub fn local_collaborator(&self) -> &Collaborator {
        &self.local
    }

    pub fn has(&self, session_id: &str) -> bool {
        self.members.borrow().contains_key(session_id)
    }

    pub fn get(&self, session_id: &str) -> Option<Collaborator> {
        self.members.borrow().get(session_id).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.members.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }

    /// Add or replace a participant
    pub fn insert(&self, collaborator: Collaborator) {
        tracing::debug!(
            "CollaboratorRoster: '{}' joined as {}",
            collaborator.display_name,
            collaborator.session_id
        );
        self.members
            .borrow_mut()
            .insert(collaborator.session_id.clone(), collaborator);
        self.changed.emit(&());
    }

    /// Remove a participant; emits only if it was present
    pub fn remove(&self, session_id: &str) -> Option<Collaborator> {
        let removed = self.members.borrow_mut().remove(session_id);
        if removed.is_some() {
            tracing::debug!("CollaboratorRoster: {} left", session_id);
            self.changed.emit(&());
        }
        removed
    }
}

/// Shared-editing state attached to a document model
#[derive(Debug)]
pub struct CollaborativeSession {
    collaborative: bool,
    connected: ReadySignal,
    roster: RefCell<Option<Rc<CollaboratorRoster>>>,
}

impl CollaborativeSession {
    /// Session for a store that supports shared editing
    pub fn collaborative() -> Self {
        Self {
            collaborative: true,
            connected: ReadySignal::new(),
            roster: RefCell::new(None),
        }
    }

    /// Session for a purely local store
    pub fn local() -> Self {
        Self {
            collaborative: false,
            connected: ReadySignal::new(),
            roster: RefCell::new(None),
        }
    }

    pub fn is_collaborative(&self) -> bool {
        self.collaborative
    }

    pub fn connected(&self) -> ReadyWaiter {
        self.connected.waiter()
    }

    /// Install the roster and resolve the connection
    pub fn connect(&self, roster: Option<Rc<CollaboratorRoster>>) {
        *self.roster.borrow_mut() = roster;
        self.connected.resolve();
    }

    pub fn collaborators(&self) -> Option<Rc<CollaboratorRoster>> {
        self.roster.borrow().clone()
    }
}
