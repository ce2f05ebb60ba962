//! # Text Editor
//!
//! Headless editor surface: keeps focus, selection style and an undo stack
//! of whole-buffer snapshots. User edits go through the [`EditorModel`], so
//! anything bound to the model sees them as ordinary value changes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::code_editor::{CodeEditor, EditorFactory, EditorOptions};
use super::editor_model::EditorModel;
use super::types::{EditorConfig, LogicalPosition, SelectionStyle};

/// In-memory [`CodeEditor`] implementation
#[derive(Debug)]
pub struct TextEditor {
    model: Rc<EditorModel>,
    config: EditorConfig,
    history: RefCell<Vec<String>>,
    has_focus: Cell<bool>,
    focus_requests: Cell<usize>,
    read_only: Cell<bool>,
    uuid: RefCell<String>,
    selection_style: RefCell<SelectionStyle>,
}

impl TextEditor {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            model: options.model,
            config: options.config,
            history: RefCell::new(Vec::new()),
            has_focus: Cell::new(false),
            focus_requests: Cell::new(0),
            read_only: Cell::new(false),
            uuid: RefCell::new(String::new()),
            selection_style: RefCell::new(SelectionStyle::default()),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// How many times focus was actually moved into this editor
    pub fn focus_requests(&self) -> usize {
        self.focus_requests.get()
    }

    fn apply_user_edit(&self, new_value: String) -> bool {
        if self.read_only.get() {
            tracing::debug!("TextEditor: refusing edit on read-only editor");
            return false;
        }
        let previous = self.model.text();
        self.history.borrow_mut().push(previous);
        self.model.set_text(&new_value);
        true
    }
}

impl CodeEditor for TextEditor {
    fn model(&self) -> &Rc<EditorModel> {
        &self.model
    }

    fn focus(&self) {
        if !self.has_focus.get() {
            self.focus_requests.set(self.focus_requests.get() + 1);
        }
        self.has_focus.set(true);
    }

    fn blur(&self) {
        self.has_focus.set(false);
    }

    fn has_focus(&self) -> bool {
        self.has_focus.get()
    }

    fn clear_history(&self) {
        self.history.borrow_mut().clear();
    }

    fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    fn uuid(&self) -> String {
        self.uuid.borrow().clone()
    }

    fn set_uuid(&self, uuid: &str) {
        *self.uuid.borrow_mut() = uuid.to_string();
    }

    fn selection_style(&self) -> SelectionStyle {
        self.selection_style.borrow().clone()
    }

    fn set_selection_style(&self, style: SelectionStyle) {
        *self.selection_style.borrow_mut() = style;
    }

    fn is_read_only(&self) -> bool {
        self.read_only.get()
    }

    fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    fn insert(&self, position: LogicalPosition, text: &str) -> bool {
        let mut value = self.model.text();
        let offset = position.to_offset(&value);
        value.insert_str(offset, text);
        self.apply_user_edit(value)
    }

    fn replace_all(&self, text: &str) -> bool {
        self.apply_user_edit(text.to_string())
    }

    fn undo(&self) -> bool {
        let previous = self.history.borrow_mut().pop();
        match previous {
            Some(previous) => {
                self.model.set_text(&previous);
                true
            }
            None => false,
        }
    }
}

/// Factory producing [`TextEditor`] surfaces
#[derive(Debug, Default, Clone)]
pub struct TextEditorFactory;

impl TextEditorFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EditorFactory for TextEditorFactory {
    fn new_document_editor(&self, options: EditorOptions) -> Rc<dyn CodeEditor> {
        Rc::new(TextEditor::new(options))
    }
}
