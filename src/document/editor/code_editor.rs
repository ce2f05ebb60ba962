//! # Code Editor Abstraction
//!
//! The pluggable editing surface a widget hosts. Surfaces are created by an
//! [`EditorFactory`] so hosts can swap the implementation without touching
//! widget code.

use std::rc::Rc;

use super::editor_model::EditorModel;
use super::types::{EditorConfig, LogicalPosition, SelectionStyle};

/// Editing surface bound to an [`EditorModel`]
pub trait CodeEditor {
    fn model(&self) -> &Rc<EditorModel>;

    fn focus(&self);

    fn blur(&self);

    fn has_focus(&self) -> bool;

    /// Forget all undo history
    fn clear_history(&self);

    fn history_len(&self) -> usize;

    /// Identifier this editor uses for its own selections
    fn uuid(&self) -> String;

    fn set_uuid(&self, uuid: &str);

    fn selection_style(&self) -> SelectionStyle;

    fn set_selection_style(&self, style: SelectionStyle);

    fn is_read_only(&self) -> bool;

    fn set_read_only(&self, read_only: bool);

    /// User edit: insert text. Returns false if the edit was refused.
    fn insert(&self, position: LogicalPosition, text: &str) -> bool;

    /// User edit: replace everything. Returns false if the edit was refused.
    fn replace_all(&self, text: &str) -> bool;

    /// Revert the most recent user edit
    fn undo(&self) -> bool;
}

/// Everything needed to build an editor surface
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub model: Rc<EditorModel>,
    pub config: EditorConfig,
}

/// Creates editor surfaces for document widgets
pub trait EditorFactory {
    fn new_document_editor(&self, options: EditorOptions) -> Rc<dyn CodeEditor>;
}
