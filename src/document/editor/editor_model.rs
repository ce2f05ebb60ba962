//! # Editor Model
//!
//! State mirrored by an editor surface: its text, the mime type used for
//! highlighting, and the selections of every collaborator.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::types::TextSelection;
use crate::document::events::Signal;

/// Mutable state behind an editor surface
#[derive(Debug, Default)]
pub struct EditorModel {
    value: RefCell<String>,
    mime_type: RefCell<String>,
    selections: RefCell<BTreeMap<String, Vec<TextSelection>>>,
    mutations: Cell<u64>,
    value_changed: Signal<()>,
    mime_type_changed: Signal<String>,
}

impl EditorModel {
    pub fn new() -> Self {
        Self {
            mime_type: RefCell::new("text/plain".to_string()),
            ..Self::default()
        }
    }

    pub fn text(&self) -> String {
        self.value.borrow().clone()
    }

    /// Replace the text. Always counts as a mutation and always notifies.
    pub fn set_text(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
        self.mutations.set(self.mutations.get() + 1);
        self.value_changed.emit(&());
    }

    /// Number of times the text has been replaced
    pub fn mutation_count(&self) -> u64 {
        self.mutations.get()
    }

    pub fn mime_type(&self) -> String {
        self.mime_type.borrow().clone()
    }

    pub fn set_mime_type(&self, mime_type: &str) {
        if *self.mime_type.borrow() == mime_type {
            return;
        }
        *self.mime_type.borrow_mut() = mime_type.to_string();
        self.mime_type_changed.emit(&mime_type.to_string());
    }

    pub fn set_selections(&self, id: &str, selections: Vec<TextSelection>) {
        self.selections
            .borrow_mut()
            .insert(id.to_string(), selections);
    }

    pub fn remove_selections(&self, id: &str) -> bool {
        self.selections.borrow_mut().remove(id).is_some()
    }

    pub fn selections(&self, id: &str) -> Option<Vec<TextSelection>> {
        self.selections.borrow().get(id).cloned()
    }

    pub fn has_selections(&self, id: &str) -> bool {
        self.selections.borrow().contains_key(id)
    }

    /// Snapshot of the ids that currently own selections
    pub fn selection_keys(&self) -> Vec<String> {
        self.selections.borrow().keys().cloned().collect()
    }

    pub fn value_changed(&self) -> &Signal<()> {
        &self.value_changed
    }

    pub fn mime_type_changed(&self) -> &Signal<String> {
        &self.mime_type_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::editor::types::LogicalPosition;
    use std::rc::Rc;

    #[test]
    fn set_text_should_count_every_mutation() {
        let model = EditorModel::new();

        model.set_text("a");
        model.set_text("a");

        assert_eq!(model.text(), "a");
        assert_eq!(model.mutation_count(), 2);
    }

    #[test]
    fn set_text_should_notify_listeners() {
        let model = EditorModel::new();
        let notified = Rc::new(Cell::new(0));
        let notified_clone = Rc::clone(&notified);
        model
            .value_changed()
            .connect(move |_| notified_clone.set(notified_clone.get() + 1));

        model.set_text("x");

        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn mime_type_should_default_to_plain_text_and_notify_on_change() {
        let model = EditorModel::new();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let changes_clone = Rc::clone(&changes);
        model
            .mime_type_changed()
            .connect(move |mime| changes_clone.borrow_mut().push(mime.clone()));

        assert_eq!(model.mime_type(), "text/plain");
        model.set_mime_type("text/x-python");
        model.set_mime_type("text/x-python");

        assert_eq!(*changes.borrow(), vec!["text/x-python".to_string()]);
    }

    #[test]
    fn selections_should_be_keyed_by_collaborator() {
        let model = EditorModel::new();
        let cursor = TextSelection::cursor(LogicalPosition::new(0, 1));

        model.set_selections("a", vec![cursor]);
        model.set_selections("b", vec![]);

        assert_eq!(model.selection_keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(model.selections("a"), Some(vec![cursor]));
        assert!(model.remove_selections("b"));
        assert!(!model.has_selections("b"));
    }
}
