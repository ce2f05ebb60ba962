//! # Widgets Module
//!
//! The editor binding and the composite widget built around it.
//!
//! ```text
//! DocumentWidget ─┬─ Title   (label from path, dirty marker)
//!                 ├─ Toolbar
//!                 └─ FileEditor ── EditorBinding ── CodeEditor
//!                                        │
//!                                        └── DocumentContext ── DocumentModel
//! ```

pub mod binding;
pub mod document_widget;
pub mod file_editor;
pub mod title;
pub mod toolbar;

pub use binding::{BindingState, EditorBinding};
pub use document_widget::{title_for_path, DocumentWidget, TEXT_EDITOR_ICON_CLASS};
pub use file_editor::FileEditor;
pub use title::{Title, DIRTY_CLASS};
pub use toolbar::{Toolbar, ToolbarItem};
