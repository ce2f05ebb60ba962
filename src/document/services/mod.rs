//! # Services Layer
//!
//! Collaborators that widgets consume but do not own: the editor factory
//! and the mime type lookup. Hosts swap implementations here.

pub mod mime;

pub use mime::{ExtensionMimeTypeService, MimeTypeService, DEFAULT_MIME_TYPE};

use std::rc::Rc;

use crate::document::editor::{EditorConfig, EditorFactory, TextEditorFactory};

/// Aggregates the services a file editor needs
#[derive(Clone)]
pub struct EditorServices {
    /// Builds editor surfaces
    pub factory_service: Rc<dyn EditorFactory>,
    /// Picks a mime type from a path
    pub mime_type_service: Rc<dyn MimeTypeService>,
    /// Preferences applied to every new editor
    pub editor_config: EditorConfig,
}

impl EditorServices {
    /// Headless editor and extension-based mime lookup
    pub fn new() -> Self {
        Self {
            factory_service: Rc::new(TextEditorFactory::new()),
            mime_type_service: Rc::new(ExtensionMimeTypeService::new()),
            editor_config: EditorConfig::default(),
        }
    }

    pub fn with_editor_config(mut self, config: EditorConfig) -> Self {
        self.editor_config = config;
        self
    }
}

impl Default for EditorServices {
    fn default() -> Self {
        Self::new()
    }
}
