//! # Editor Module
//!
//! Editor surface abstraction, its model, and the bundled headless editor.

pub mod code_editor;
pub mod editor_model;
pub mod text_editor;
pub mod types;

pub use code_editor::{CodeEditor, EditorFactory, EditorOptions};
pub use editor_model::EditorModel;
pub use text_editor::{TextEditor, TextEditorFactory};
pub use types::{EditorConfig, LogicalPosition, SelectionStyle, TextSelection};
