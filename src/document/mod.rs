//! # Document Core
//!
//! Document model, context, editor binding, and widget factory.
//!
//! Everything here is single-threaded: state lives behind `Rc`, `Cell`
//! and `RefCell`, notifications are delivered synchronously, and the only
//! suspension points are context readiness, backend I/O and collaborative
//! session connection.

pub mod collab;
pub mod context;
pub mod editor;
pub mod errors;
pub mod events;
pub mod factory;
pub mod models;
pub mod services;
pub mod widgets;

// Re-export the types most callers need
pub use collab::{Collaborator, CollaboratorRoster, CollaborativeSession};
pub use context::{
    Context, ContentsManager, DocumentContext, FileContentsManager, MemoryContentsManager,
};
pub use editor::{CodeEditor, EditorConfig, EditorFactory, EditorModel, TextEditorFactory};
pub use errors::{DocumentError, Result};
pub use events::{ReadySignal, ReadyWaiter, SaveState, Signal, StateAttribute, StateChange, UiEvent};
pub use factory::{
    FileEditorFactory, WidgetCapabilities, WidgetFactoryDescriptor, WidgetFactoryOptions,
};
pub use models::{DocumentModel, ModelFactory, TextModelFactory};
pub use services::{EditorServices, ExtensionMimeTypeService, MimeTypeService};
pub use widgets::{BindingState, DocumentWidget, EditorBinding, FileEditor, Title, DIRTY_CLASS};
