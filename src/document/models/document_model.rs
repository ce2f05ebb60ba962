//! # Document Model
//!
//! Canonical in-memory representation of an open file: the text buffer,
//! the dirty and read-only flags, and the default language hint. Every
//! content replacement marks the model dirty; only the owning context
//! clears the flag after a successful load or save.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::document::collab::CollaborativeSession;
use crate::document::errors::Result;
use crate::document::events::{Signal, StateAttribute, StateChange};

/// Text document model with change notifications
pub struct DocumentModel {
    text: RefCell<String>,
    dirty: Cell<bool>,
    read_only: Cell<bool>,
    default_language: String,
    session: Option<Rc<CollaborativeSession>>,
    content_changed: Signal<()>,
    state_changed: Signal<StateChange>,
}

impl DocumentModel {
    /// Create an empty, clean model
    pub fn new(language_preference: &str) -> Self {
        Self {
            text: RefCell::new(String::new()),
            dirty: Cell::new(false),
            read_only: Cell::new(false),
            default_language: language_preference.to_string(),
            session: None,
            content_changed: Signal::new(),
            state_changed: Signal::new(),
        }
    }

    /// Create a model backed by a (possibly collaborative) session
    pub fn with_session(language_preference: &str, session: Rc<CollaborativeSession>) -> Self {
        Self {
            session: Some(session),
            ..Self::new(language_preference)
        }
    }

    /// Replace the whole buffer.
    ///
    /// Always notifies, even when the value is unchanged, so callers can use
    /// it to force listeners to resynchronise.
    pub fn from_string(&self, value: &str) {
        *self.text.borrow_mut() = value.to_string();
        self.trigger_content_change();
    }

    /// Parse the buffer as JSON. An empty buffer is `null`.
    pub fn to_json(&self) -> Result<Value> {
        let text = self.text.borrow();
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Serialize a structured value into the buffer
    pub fn from_json(&self, value: &Value) {
        self.from_string(&value.to_string());
    }

    /// Parse `raw` as JSON and store it. Malformed input leaves the buffer as is.
    pub fn from_json_str(&self, raw: &str) -> Result<()> {
        let value: Value = serde_json::from_str(raw)?;
        self.from_json(&value);
        Ok(())
    }

    pub fn dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn set_dirty(&self, value: bool) {
        self.set_state(StateAttribute::Dirty, &self.dirty, value);
    }

    pub fn read_only(&self) -> bool {
        self.read_only.get()
    }

    pub fn set_read_only(&self, value: bool) {
        self.set_state(StateAttribute::ReadOnly, &self.read_only, value);
    }

    /// Language hint used when picking a kernel
    pub fn default_kernel_language(&self) -> &str {
        &self.default_language
    }

    /// Plain text documents never prefer a specific kernel
    pub fn default_kernel_name(&self) -> &str {
        ""
    }

    /// Hook run once a brand new document has been created
    pub fn initialize(&self) {}

    pub fn session(&self) -> Option<&Rc<CollaborativeSession>> {
        self.session.as_ref()
    }

    pub fn content_changed(&self) -> &Signal<()> {
        &self.content_changed
    }

    pub fn state_changed(&self) -> &Signal<StateChange> {
        &self.state_changed
    }

    fn set_state(&self, name: StateAttribute, cell: &Cell<bool>, new_value: bool) {
        let old_value = cell.get();
        if old_value == new_value {
            return;
        }
        cell.set(new_value);
        self.state_changed.emit(&StateChange {
            name,
            old_value,
            new_value,
        });
    }

    fn trigger_content_change(&self) {
        self.content_changed.emit(&());
        self.set_dirty(true);
    }
}

impl fmt::Display for DocumentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text.borrow())
    }
}

impl fmt::Debug for DocumentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentModel")
            .field("len", &self.text.borrow().len())
            .field("dirty", &self.dirty.get())
            .field("read_only", &self.read_only.get())
            .field("default_language", &self.default_language)
            .finish()
    }
}
